use std::iter::FusedIterator;

use log::trace;

use super::*;

pub trait Connectivity: ArcList {
    /// Returns an iterator over the connected components of an undirected graph.
    /// Each item is the order of a component together with its member bitset.
    /// Components are emitted in order of their smallest node.
    fn connected_component_bits(&self) -> ConnectedComponentBits<'_, Self>
    where
        Self: GraphType<Dir = Undirected>,
    {
        ConnectedComponentBits::new(self)
    }

    /// Returns an iterator over the connected components of an undirected graph.
    /// Each item lists the members of a component in depth-first pre-order.
    fn connected_component_lists(&self) -> ConnectedComponentLists<'_, Self>
    where
        Self: GraphType<Dir = Undirected>,
    {
        ConnectedComponentLists::new(self)
    }

    /// Returns one representative node per connected component (its smallest node)
    /// and, in a parallel vector, the order of each component.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(6, [(0, 3), (0, 4), (3, 4), (1, 5)]);
    /// assert_eq!(g.connected_component_reps(), (vec![0, 1, 2], vec![3, 2, 1]));
    /// ```
    fn connected_component_reps(&self) -> (Vec<Node>, Vec<NumNodes>)
    where
        Self: GraphType<Dir = Undirected>,
    {
        let mut visited = self.vertex_bitset_unset();
        let mut reps = Vec::new();
        let mut orders = Vec::new();

        for u in self.vertices() {
            if visited.get_bit(u) {
                continue;
            }

            let before = visited.cardinality();
            self.depth_first(u).visited(&mut visited).run();

            reps.push(u);
            orders.push(visited.cardinality() - before);
        }

        (reps, orders)
    }

    /// Returns *true* if the undirected graph consists of a single connected component.
    /// A graph without nodes is connected.
    fn is_connected(&self) -> bool
    where
        Self: GraphType<Dir = Undirected>,
    {
        self.is_empty() || self.reachable_from(0).cardinality() == self.number_of_nodes()
    }

    /// Returns an iterator over the strongly connected components of a directed graph
    fn strongly_connected_components(&self) -> StronglyConnectedComponents<'_, Self>
    where
        Self: DirectedAdjacencyList,
    {
        StronglyConnectedComponents::new(self)
    }

    /// Like [`Connectivity::strongly_connected_components`], but a single node only forms a
    /// component if it has a loop
    fn strongly_connected_components_no_singletons(&self) -> StronglyConnectedComponents<'_, Self>
    where
        Self: DirectedAdjacencyList,
    {
        StronglyConnectedComponents::new(self).include_singletons(false)
    }

    /// Returns all strongly connected components of a directed graph.
    ///
    /// Components are in reverse topological order of the condensation; the nodes of
    /// a component are listed in the order they were popped off the Tarjan stack,
    /// ending with the root of the component.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(4, [(0, 1), (1, 0), (1, 2), (2, 3), (3, 2)]);
    /// assert_eq!(g.tarjan(), vec![vec![3, 2], vec![1, 0]]);
    /// ```
    fn tarjan(&self) -> Vec<Vec<Node>>
    where
        Self: DirectedAdjacencyList,
    {
        self.strongly_connected_components().collect()
    }
}

impl<G: ArcList> Connectivity for G {}

/// Iterator over `(order, members)` of all connected components.
///
/// The iterator owns the visited set of the whole graph; each call to `next`
/// runs a single depth-first traversal from the smallest unvisited node, so
/// consumers may stop early without paying for the remaining components.
pub struct ConnectedComponentBits<'a, G>
where
    G: ArcList + GraphType<Dir = Undirected>,
{
    graph: &'a G,
    visited: NodeBitSet,
    next_start: Node,
}

impl<'a, G> ConnectedComponentBits<'a, G>
where
    G: ArcList + GraphType<Dir = Undirected>,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            next_start: 0,
        }
    }
}

impl<G> Iterator for ConnectedComponentBits<'_, G>
where
    G: ArcList + GraphType<Dir = Undirected>,
{
    type Item = (NumNodes, NodeBitSet);

    fn next(&mut self) -> Option<Self::Item> {
        let start = next_unvisited(
            &self.visited,
            &mut self.next_start,
            self.graph.number_of_nodes(),
        )?;

        let mut members = self.graph.vertex_bitset_unset();
        self.graph
            .depth_first(start)
            .visited(&mut self.visited)
            .node_visitor(&mut |u| {
                members.set_bit(u);
                true
            })
            .run();

        let order = members.cardinality();
        trace!("connected component at {start} with {order} nodes");
        Some((order, members))
    }
}

impl<G> FusedIterator for ConnectedComponentBits<'_, G> where G: ArcList + GraphType<Dir = Undirected> {}

/// Iterator over the member lists of all connected components
pub struct ConnectedComponentLists<'a, G>
where
    G: ArcList + GraphType<Dir = Undirected>,
{
    graph: &'a G,
    visited: NodeBitSet,
    next_start: Node,
}

impl<'a, G> ConnectedComponentLists<'a, G>
where
    G: ArcList + GraphType<Dir = Undirected>,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            next_start: 0,
        }
    }
}

impl<G> Iterator for ConnectedComponentLists<'_, G>
where
    G: ArcList + GraphType<Dir = Undirected>,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = next_unvisited(
            &self.visited,
            &mut self.next_start,
            self.graph.number_of_nodes(),
        )?;

        let mut members = Vec::new();
        self.graph
            .depth_first(start)
            .visited(&mut self.visited)
            .node_visitor(&mut |u| {
                members.push(u);
                true
            })
            .run();

        trace!("connected component at {start} with {} nodes", members.len());
        Some(members)
    }
}

impl<G> FusedIterator for ConnectedComponentLists<'_, G> where G: ArcList + GraphType<Dir = Undirected> {}

/// Advances `cursor` to the next unvisited node and returns it
fn next_unvisited(visited: &NodeBitSet, cursor: &mut Node, n: NumNodes) -> Option<Node> {
    while *cursor < n {
        let u = *cursor;
        *cursor += 1;
        if !visited.get_bit(u) {
            return Some(u);
        }
    }
    None
}

/// Implementation of Tarjan's Algorithm for Strongly Connected Components.
/// It is designed as an iterator that emits the nodes of one strongly connected component at a
/// time. Components are emitted in reverse topological order of the SCCs (i.e. if each SCC
/// were contracted into a single node); within a component, nodes are listed in the order they
/// leave the Tarjan stack, so the root of the component comes last.
pub struct StronglyConnectedComponents<'a, G>
where
    G: DirectedAdjacencyList + ArcList,
{
    graph: &'a G,
    idx: Node,

    states: Vec<NodeState>,
    potentially_unvisited: usize,

    include_singletons: bool,

    path_stack: Vec<Node>,

    call_stack: Vec<StackFrame>,
}

impl<'a, G> StronglyConnectedComponents<'a, G>
where
    G: DirectedAdjacencyList + ArcList,
{
    /// Construct the iterator for some graph
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            idx: 0,
            states: vec![Default::default(); graph.len()],
            potentially_unvisited: 0,

            include_singletons: true,

            path_stack: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
        }
    }

    /// Each node that is not part of a circle is returned as its own SCC.
    /// By setting `include = false`, those nodes are not returned.
    pub fn set_include_singletons(&mut self, include: bool) {
        self.include_singletons = include;
    }

    pub fn include_singletons(mut self, include: bool) -> Self {
        self.set_include_singletons(include);
        self
    }

    /// Finds the smallest node not covered by an earlier search and puts it on the call stack
    fn next_unvisited_node(&mut self) -> Option<Node> {
        while self.potentially_unvisited < self.graph.len() {
            if !self.states[self.potentially_unvisited].visited {
                let v = self.potentially_unvisited as Node;
                self.push_node(v, None);
                return Some(v);
            }

            self.potentially_unvisited += 1;
        }
        None
    }

    /// Put a pristine stack frame on the call stack, i.e. the first step of a recursive call
    fn push_node(&mut self, node: Node, parent: Option<Node>) {
        self.call_stack.push(StackFrame {
            node,
            parent: parent.unwrap_or(node),
            initial_stack_len: 0,
            first_call: true,
            has_loop: false,
            next_arc: 0,
        });
    }

    fn search(&mut self) -> Option<Vec<Node>> {
        // The recursion of Tarjan's algorithm is simulated by `self.call_stack`: all state of a
        // call (including the position in its arc list) lives in its frame, so we can pause after
        // a component was found and resume on the next call to `search`.
        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let v = frame.node;

            if frame.first_call {
                frame.first_call = false;
                frame.initial_stack_len = self.path_stack.len();

                self.states[v as usize].visit(self.idx);
                self.idx += 1;

                self.path_stack.push(v);
            }

            let arcs = self.graph.arcs_of(v);
            while let Some(arc) = arcs.get(frame.next_arc) {
                frame.next_arc += 1;

                let w = arc.target();
                let w_state = self.states[w as usize];
                frame.has_loop |= w == v;

                if !w_state.visited {
                    self.push_node(w, Some(v));
                    continue 'recurse;
                } else if w_state.on_stack {
                    self.states[v as usize].try_lower_link(w_state.index);
                }
            }

            let (parent, initial_stack_len, has_loop) =
                (frame.parent, frame.initial_stack_len, frame.has_loop);
            self.call_stack.pop();

            let state = self.states[v as usize];
            self.states[parent as usize].try_lower_link(state.low_link);

            if !state.is_root() {
                continue;
            }

            if !self.include_singletons && self.path_stack.len() == initial_stack_len + 1 && !has_loop {
                // skip producing component descriptor, since we have a singleton node
                self.states[v as usize].on_stack = false;
                self.path_stack.pop();
                continue;
            }

            let component = self.path_stack.drain(initial_stack_len..).rev().collect_vec();
            for &w in &component {
                self.states[w as usize].on_stack = false;
            }

            debug_assert_eq!(component.last(), Some(&v));
            trace!("strongly connected component of {v} with {} nodes", component.len());
            return Some(component);
        }

        None
    }
}

impl<G> Iterator for StronglyConnectedComponents<'_, G>
where
    G: DirectedAdjacencyList + ArcList,
{
    type Item = Vec<Node>;

    /// Returns either a vector of node ids that form an SCC or None if no further SCC was found
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.search() {
                return Some(x);
            }

            self.next_unvisited_node()?;
        }
    }
}

impl<G> FusedIterator for StronglyConnectedComponents<'_, G> where G: DirectedAdjacencyList + ArcList {}

#[derive(Debug, Clone)]
struct StackFrame {
    node: Node,
    parent: Node,
    initial_stack_len: usize,
    first_call: bool,
    has_loop: bool,
    next_arc: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    on_stack: bool,
    index: Node,
    low_link: Node,
}

impl NodeState {
    fn visit(&mut self, u: Node) {
        debug_assert!(!self.visited);
        self.index = u;
        self.low_link = u;
        self.visited = true;
        self.on_stack = true;
    }

    fn try_lower_link(&mut self, l: Node) {
        self.low_link = self.low_link.min(l);
    }

    fn is_root(&self) -> bool {
        self.index == self.low_link
    }
}
