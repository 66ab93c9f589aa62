/*!
Depth-first and breadth-first traversal engines.

Both engines are configured with the *Builder* pattern and executed with `run`:
```
use adjgraphs::{prelude::*, algo::*};

let g = AdjArray::from_edges(4, [(0, 1), (0, 2), (1, 2), (2, 3), (3, 1)]);

let mut order = Vec::new();
g.depth_first(0)
    .node_visitor(&mut |u| {
        order.push(u);
        true
    })
    .run();
assert_eq!(order, vec![0, 1, 2, 3]);
```

Every option borrows caller-owned state for the duration of the traversal:
- a visited set, which can be threaded through several runs to explore a graph incrementally,
- a node visitor called once per newly discovered node,
- an arc visitor called for every arc examined out of a visited node,
- a [`FromList`] recording parent and path length of every discovered node,
- (DFS only) a bitset holding exactly the nodes on the current root path,
- a random source to explore the arcs of every node in random order.

Visitors return `bool`; returning *false* aborts the traversal immediately and
`run` returns *false*. Nodes marked before the abort stay marked.

Both engines keep an explicit stack (or queue) instead of recursing, so the
depth of a traversal is only bounded by memory.
*/

use std::collections::VecDeque;

use rand::{RngCore, seq::SliceRandom};

use super::*;

/// Callback invoked for every newly discovered node
pub type NodeVisitor<'a> = &'a mut dyn FnMut(Node) -> bool;

/// Callback invoked with `(u, i)` for the `i`-th arc of `u`
pub type ArcVisitor<'a> = &'a mut dyn FnMut(Node, usize) -> bool;

/// Options shared by both traversal engines
struct Hooks<'a> {
    visited: Option<&'a mut NodeBitSet>,
    from: Option<&'a mut FromList>,
    node_visitor: Option<NodeVisitor<'a>>,
    arc_visitor: Option<ArcVisitor<'a>>,
    rng: Option<&'a mut dyn RngCore>,
}

impl<'a> Hooks<'a> {
    fn new() -> Self {
        Self {
            visited: None,
            from: None,
            node_visitor: None,
            arc_visitor: None,
            rng: None,
        }
    }

    fn has_output(&self) -> bool {
        self.visited.is_some()
            || self.from.is_some()
            || self.node_visitor.is_some()
            || self.arc_visitor.is_some()
    }

    #[inline]
    fn visit_node(&mut self, u: Node) -> bool {
        self.node_visitor.as_deref_mut().is_none_or(|visit| visit(u))
    }

    #[inline]
    fn visit_arc(&mut self, u: Node, i: usize) -> bool {
        self.arc_visitor.as_deref_mut().is_none_or(|visit| visit(u, i))
    }

    /// Returns the order in which the `degree` arcs of a node are explored,
    /// or `None` for insertion order
    fn arc_order(&mut self, degree: usize) -> Option<Vec<usize>> {
        self.rng.as_deref_mut().map(|rng| {
            let mut order = (0..degree).collect_vec();
            order.shuffle(rng);
            order
        })
    }
}

struct Frame {
    node: Node,
    next: usize,
    order: Option<Vec<usize>>,
}

impl Frame {
    #[inline]
    fn arc_index(&self) -> usize {
        self.order.as_ref().map_or(self.next, |order| order[self.next])
    }
}

/// A configured depth-first traversal.
///
/// Nodes are marked visited *before* the node visitor is called, and
/// neighbors are explored in arc order (or a random permutation of it).
pub struct DepthFirst<'a, G: ArcList> {
    graph: &'a G,
    start: Node,
    hooks: Hooks<'a>,
    path_bits: Option<&'a mut NodeBitSet>,
}

impl<'a, G: ArcList> DepthFirst<'a, G> {
    /// Creates a traversal of `graph` starting at `start` without any output
    pub fn new(graph: &'a G, start: Node) -> Self {
        Self {
            graph,
            start,
            hooks: Hooks::new(),
            path_bits: None,
        }
    }

    /// Uses (and updates) a caller-supplied visited set.
    /// Nodes already marked are never entered.
    pub fn visited(mut self, visited: &'a mut NodeBitSet) -> Self {
        self.hooks.visited = Some(visited);
        self
    }

    /// Calls `visitor` once for every newly discovered node; returning *false* aborts.
    pub fn node_visitor(mut self, visitor: NodeVisitor<'a>) -> Self {
        self.hooks.node_visitor = Some(visitor);
        self
    }

    /// Calls `visitor(u, i)` for every arc examined, whether or not its target
    /// is already visited; returning *false* aborts.
    pub fn arc_visitor(mut self, visitor: ArcVisitor<'a>) -> Self {
        self.hooks.arc_visitor = Some(visitor);
        self
    }

    /// Records the parent and path length of every discovered node
    pub fn from_list(mut self, from: &'a mut FromList) -> Self {
        self.hooks.from = Some(from);
        self
    }

    /// Keeps exactly the nodes of the current root path set in `bits`
    pub fn path_bits(mut self, bits: &'a mut NodeBitSet) -> Self {
        self.path_bits = Some(bits);
        self
    }

    /// Explores the arcs of every node in a random order drawn from `rng`
    pub fn random(mut self, rng: &'a mut dyn RngCore) -> Self {
        self.hooks.rng = Some(rng);
        self
    }

    /// Executes the traversal.
    ///
    /// Returns *false* iff a visitor aborted. If `start` is already marked in
    /// the supplied visited set, nothing happens and *true* is returned.
    ///
    /// ** Panics if no output (visited set, visitor, from-list, path bits) was configured **
    pub fn run(mut self) -> bool {
        assert!(
            self.hooks.has_output() || self.path_bits.is_some(),
            "depth-first traversal without any output"
        );

        let graph = self.graph;
        let mut local;
        let visited = match self.hooks.visited.take() {
            Some(visited) => visited,
            None => {
                local = graph.vertex_bitset_unset();
                &mut local
            }
        };

        if visited.get_bit(self.start) {
            return true;
        }

        if !self.enter(visited, self.start, None) {
            return false;
        }
        let mut stack = vec![self.frame(self.start)];

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;
            let arcs = graph.arcs_of(u);
            if frame.next == arcs.len() {
                if let Some(bits) = self.path_bits.as_deref_mut() {
                    bits.clear_bit(u);
                }
                stack.pop();
                continue;
            }

            let i = frame.arc_index();
            frame.next += 1;

            if !self.hooks.visit_arc(u, i) {
                return false;
            }

            let v = arcs[i].target();
            if visited.get_bit(v) {
                continue;
            }

            if !self.enter(visited, v, Some(u)) {
                return false;
            }
            let frame = self.frame(v);
            stack.push(frame);
        }

        true
    }

    fn enter(&mut self, visited: &mut NodeBitSet, u: Node, parent: Option<Node>) -> bool {
        visited.set_bit(u);
        if let Some(from) = self.hooks.from.as_deref_mut() {
            from.record(u, parent);
        }
        if let Some(bits) = self.path_bits.as_deref_mut() {
            bits.set_bit(u);
        }
        self.hooks.visit_node(u)
    }

    fn frame(&mut self, u: Node) -> Frame {
        Frame {
            node: u,
            next: 0,
            order: self.hooks.arc_order(self.graph.arcs_of(u).len()),
        }
    }
}

/// A configured breadth-first traversal.
///
/// Nodes are marked (and recorded in the from-list) when they are enqueued and
/// passed to the visitors when they are dequeued. The length recorded in the
/// from-list is therefore the BFS level of a node.
pub struct BreadthFirst<'a, G: ArcList> {
    graph: &'a G,
    start: Node,
    hooks: Hooks<'a>,
    stop_at: Option<Node>,
}

impl<'a, G: ArcList> BreadthFirst<'a, G> {
    /// Creates a traversal of `graph` starting at `start` without any output
    pub fn new(graph: &'a G, start: Node) -> Self {
        Self {
            graph,
            start,
            hooks: Hooks::new(),
            stop_at: None,
        }
    }

    /// Uses (and updates) a caller-supplied visited set.
    /// Nodes already marked are never enqueued.
    pub fn visited(mut self, visited: &'a mut NodeBitSet) -> Self {
        self.hooks.visited = Some(visited);
        self
    }

    /// Calls `visitor` once for every dequeued node; returning *false* aborts.
    pub fn node_visitor(mut self, visitor: NodeVisitor<'a>) -> Self {
        self.hooks.node_visitor = Some(visitor);
        self
    }

    /// Calls `visitor(u, i)` for every arc examined out of a dequeued node;
    /// returning *false* aborts.
    pub fn arc_visitor(mut self, visitor: ArcVisitor<'a>) -> Self {
        self.hooks.arc_visitor = Some(visitor);
        self
    }

    /// Records the parent and BFS level of every discovered node
    pub fn from_list(mut self, from: &'a mut FromList) -> Self {
        self.hooks.from = Some(from);
        self
    }

    /// Explores the arcs of every node in a random order drawn from `rng`
    pub fn random(mut self, rng: &'a mut dyn RngCore) -> Self {
        self.hooks.rng = Some(rng);
        self
    }

    /// Finishes successfully as soon as `target` is dequeued
    pub fn stop_at(mut self, target: Node) -> Self {
        self.stop_at = Some(target);
        self
    }

    /// Executes the traversal.
    ///
    /// Returns *false* iff a visitor aborted. If `start` is already marked in
    /// the supplied visited set, nothing happens and *true* is returned.
    ///
    /// ** Panics if no output (visited set, visitor, from-list) was configured **
    pub fn run(mut self) -> bool {
        assert!(
            self.hooks.has_output(),
            "breadth-first traversal without any output"
        );

        let graph = self.graph;
        let mut local;
        let visited = match self.hooks.visited.take() {
            Some(visited) => visited,
            None => {
                local = graph.vertex_bitset_unset();
                &mut local
            }
        };

        if visited.set_bit(self.start) {
            return true;
        }
        if let Some(from) = self.hooks.from.as_deref_mut() {
            from.record(self.start, None);
        }

        let mut queue = VecDeque::from([self.start]);
        while let Some(u) = queue.pop_front() {
            if !self.hooks.visit_node(u) {
                return false;
            }
            if self.stop_at == Some(u) {
                return true;
            }

            let arcs = graph.arcs_of(u);
            let order = self.hooks.arc_order(arcs.len());
            for k in 0..arcs.len() {
                let i = order.as_ref().map_or(k, |order| order[k]);
                if !self.hooks.visit_arc(u, i) {
                    return false;
                }

                let v = arcs[i].target();
                if visited.set_bit(v) {
                    continue;
                }
                if let Some(from) = self.hooks.from.as_deref_mut() {
                    from.record(v, Some(u));
                }
                queue.push_back(v);
            }
        }

        true
    }
}

/// Provides the traversal engines and common traversal queries on every graph
pub trait Traversal: ArcList {
    /// Returns an unconfigured depth-first traversal starting at `start`
    fn depth_first(&self, start: Node) -> DepthFirst<'_, Self> {
        DepthFirst::new(self, start)
    }

    /// Returns an unconfigured breadth-first traversal starting at `start`
    fn breadth_first(&self, start: Node) -> BreadthFirst<'_, Self> {
        BreadthFirst::new(self, start)
    }

    /// Returns the set of nodes reachable from `start` (including `start`)
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(3, [(0, 1), (2, 1)]);
    /// assert_eq!(g.reachable_from(0).cardinality(), 2);
    /// ```
    fn reachable_from(&self, start: Node) -> NodeBitSet {
        let mut visited = self.vertex_bitset_unset();
        self.depth_first(start).visited(&mut visited).run();
        visited
    }

    /// Returns the nodes reachable from `start` in depth-first pre-order
    fn dfs_order(&self, start: Node) -> Vec<Node> {
        let mut order = Vec::new();
        self.depth_first(start)
            .node_visitor(&mut |u| {
                order.push(u);
                true
            })
            .run();
        order
    }

    /// Returns the nodes reachable from `start` in breadth-first order
    fn bfs_order(&self, start: Node) -> Vec<Node> {
        let mut order = Vec::new();
        self.breadth_first(start)
            .node_visitor(&mut |u| {
                order.push(u);
                true
            })
            .run();
        order
    }

    /// Computes a path with the fewest arcs from `start` to `end`, both included.
    /// Returns `None` if `end` is not reachable.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (0, 3), (3, 2), (2, 2)]);
    /// assert_eq!(g.shortest_path(0, 2).map(|p| p.len()), Some(3));
    /// assert_eq!(g.shortest_path(1, 1), Some(vec![1]));
    /// ```
    fn shortest_path(&self, start: Node, end: Node) -> Option<Vec<Node>> {
        let mut from = FromList::new(self.number_of_nodes());
        self.breadth_first(start)
            .from_list(&mut from)
            .stop_at(end)
            .run();

        let path = from.path_to(end);
        (!path.is_empty()).then_some(path)
    }
}

impl<G: ArcList> Traversal for G {}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use crate::testing::arb_edge_list;

    //   0
    //  / \
    // 1-->2
    // ^   |
    // |   v
    // \---3
    fn diamond() -> AdjArray {
        AdjArray::from_edges(4, [(0, 1), (0, 2), (1, 2), (2, 3), (3, 1)])
    }

    // arcs are directed right:
    //    1   3---5
    //   / \ /   /
    //  2   4---6--\
    //           \-/
    fn bfs_graph() -> AdjArray {
        AdjArray::from_edges(7, [(2, 1), (1, 4), (4, 3), (4, 6), (3, 5), (6, 5), (6, 6)])
    }

    #[test]
    fn dfs_arc_visitor() {
        let graph = diamond();
        let mut arcs = Vec::new();
        assert!(
            graph
                .depth_first(0)
                .arc_visitor(&mut |u, i| {
                    arcs.push((u, graph.ith_neighbor(u, i)));
                    true
                })
                .run()
        );
        assert_eq!(arcs, vec![(0, 1), (1, 2), (2, 3), (3, 1), (0, 2)]);
    }

    #[test]
    fn dfs_arc_visitor_aborts() {
        let graph = diamond();
        let mut arcs = Vec::new();
        assert!(
            !graph
                .depth_first(0)
                .arc_visitor(&mut |u, i| {
                    let v = graph.ith_neighbor(u, i);
                    arcs.push((u, v));
                    u < v
                })
                .run()
        );
        assert_eq!(arcs, vec![(0, 1), (1, 2), (2, 3), (3, 1)]);
    }

    #[test]
    fn dfs_node_visitor_aborts() {
        let graph = diamond();
        assert_eq!(graph.dfs_order(0), vec![0, 1, 2, 3]);

        let mut nodes = Vec::new();
        let mut visited = graph.vertex_bitset_unset();
        assert!(
            !graph
                .depth_first(0)
                .visited(&mut visited)
                .node_visitor(&mut |u| {
                    nodes.push(u);
                    u != 2
                })
                .run()
        );
        assert_eq!(nodes, vec![0, 1, 2]);
        // nodes marked before the abort stay marked
        assert_eq!(visited.iter_set_bits().collect_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn dfs_resumes_with_visited_set() {
        let graph = AdjArray::from_edges(4, [(0, 1), (2, 3), (3, 0)]);
        let mut visited = graph.vertex_bitset_unset();

        assert!(graph.depth_first(0).visited(&mut visited).run());
        assert_eq!(visited.cardinality(), 2);

        let mut nodes = Vec::new();
        assert!(
            graph
                .depth_first(2)
                .visited(&mut visited)
                .node_visitor(&mut |u| {
                    nodes.push(u);
                    true
                })
                .run()
        );
        assert_eq!(nodes, vec![2, 3]);

        // already visited: no visitor calls
        let mut calls = 0;
        assert!(
            graph
                .depth_first(1)
                .visited(&mut visited)
                .node_visitor(&mut |_| {
                    calls += 1;
                    false
                })
                .run()
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn dfs_path_bits() {
        //   0
        //  / \
        // 1   2
        // ^   |
        // |   v
        // \---3
        let graph = AdjArray::from_edges(4, [(0, 1), (0, 2), (2, 3), (3, 1)]);

        for (stop, expected) in [(0, vec![0]), (1, vec![0, 1]), (2, vec![0, 2]), (3, vec![0, 2, 3])] {
            let mut bits = graph.vertex_bitset_unset();
            graph
                .depth_first(0)
                .path_bits(&mut bits)
                .node_visitor(&mut |u| u != stop)
                .run();
            assert_eq!(bits.iter_set_bits().collect_vec(), expected);
        }

        let mut bits = graph.vertex_bitset_unset();
        assert!(graph.depth_first(0).path_bits(&mut bits).run());
        assert_eq!(bits.cardinality(), 0);
    }

    #[test]
    fn dfs_from_list() {
        let graph = diamond();
        let mut from = FromList::new(4);
        graph.depth_first(0).from_list(&mut from).run();

        assert_eq!(from.max_len, 4);
        assert_eq!(from.path_to(3), vec![0, 1, 2, 3]);
        assert_eq!(from.leaves.iter_set_bits().collect_vec(), vec![3]);
    }

    #[test]
    fn dfs_random_order_is_a_permutation() {
        //         0
        //         |
        // -------------------
        // | | | | | | | | | |
        // 1 2 3 4 5 6 7 8 9 10
        let graph = AdjArray::from_edges(11, (1..11).map(|v| (0, v)));

        let mut shuffled = false;
        for seed in 0..10 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            let mut order = Vec::new();
            graph
                .depth_first(0)
                .random(&mut rng)
                .node_visitor(&mut |u| {
                    order.push(u);
                    true
                })
                .run();

            assert_eq!(order[0], 0);
            assert_eq!(order.iter().copied().sorted().collect_vec(), (0..11).collect_vec());
            shuffled |= order != (0..11).collect_vec();
        }
        assert!(shuffled);
    }

    #[test]
    #[should_panic]
    fn dfs_without_output_panics() {
        diamond().depth_first(0).run();
    }

    #[test]
    fn bfs_single_path() {
        let graph = bfs_graph();
        let (start, end) = (1, 6);

        let mut from = FromList::new(graph.number_of_nodes());
        let mut visited = 0;
        assert!(
            !graph
                .breadth_first(start)
                .from_list(&mut from)
                .node_visitor(&mut |u| {
                    visited += 1;
                    u != end
                })
                .run()
        );
        assert_eq!(visited, 4);
        assert_eq!(from.path_to(end), vec![1, 4, 6]);

        assert_eq!(graph.shortest_path(start, end), Some(vec![1, 4, 6]));
        assert_eq!(graph.shortest_path(start, 2), None);
    }

    #[test]
    fn bfs_all_paths() {
        let graph = bfs_graph();
        let mut from = FromList::new(graph.number_of_nodes());
        assert!(graph.breadth_first(1).from_list(&mut from).run());

        assert_eq!(from.max_len, 4);
        let paths = graph.vertices().map(|u| from.path_to(u)).collect_vec();
        assert_eq!(
            paths,
            vec![
                vec![],
                vec![1],
                vec![],
                vec![1, 4, 3],
                vec![1, 4],
                vec![1, 4, 3, 5],
                vec![1, 4, 6],
            ]
        );
    }

    #[test]
    fn bfs_levels() {
        // arcs directed down
        //    0--
        //   /|  \
        //  1 2   3
        //   /|\  |\
        //  4 5 6 7 8
        let graph = AdjArray::from_edges(
            9,
            [(0, 1), (0, 2), (0, 3), (2, 4), (2, 5), (2, 6), (3, 7), (3, 8)],
        );
        let mut from = FromList::new(9);
        let mut order = Vec::new();
        graph
            .breadth_first(0)
            .from_list(&mut from)
            .node_visitor(&mut |u| {
                order.push(u);
                true
            })
            .run();

        assert_eq!(order, (0..9).collect_vec());
        let levels = order.iter().map(|&u| from.paths[u as usize].len).collect_vec();
        assert_eq!(levels, vec![1, 2, 2, 2, 3, 3, 3, 3, 3]);
    }

    #[test]
    fn bfs_stop_at() {
        let graph = AdjArray::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.bfs_order(0), vec![0, 1, 2, 3]);

        let mut order = Vec::new();
        assert!(
            graph
                .breadth_first(0)
                .stop_at(1)
                .node_visitor(&mut |u| {
                    order.push(u);
                    true
                })
                .run()
        );
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn bfs_arc_visitor() {
        let graph = diamond();
        let mut arcs = Vec::new();
        graph
            .breadth_first(0)
            .arc_visitor(&mut |u, i| {
                arcs.push((u, graph.ith_neighbor(u, i)));
                true
            })
            .run();
        assert_eq!(arcs, vec![(0, 1), (0, 2), (1, 2), (2, 3), (3, 1)]);
    }

    proptest! {
        #[test]
        fn traversals_visit_reachable_nodes_once((n, edges) in arb_edge_list(25, 60), start in 0u32..25) {
            let graph = AdjArray::from_edges(n, edges);
            let start = start % n;

            let dfs = graph.dfs_order(start);
            let bfs = graph.bfs_order(start);
            let reachable = graph.reachable_from(start);

            prop_assert_eq!(dfs[0], start);
            prop_assert_eq!(bfs[0], start);
            prop_assert_eq!(dfs.iter().copied().sorted().collect_vec(), reachable.iter_set_bits().collect_vec());
            prop_assert_eq!(bfs.iter().copied().sorted().collect_vec(), reachable.iter_set_bits().collect_vec());

            // closed under successors
            for u in reachable.iter_set_bits() {
                for v in graph.neighbors_of(u) {
                    prop_assert!(reachable.get_bit(v));
                }
            }

            // BFS paths are shortest: every arc shortens the level by at most one
            let mut from = FromList::new(n);
            graph.breadth_first(start).from_list(&mut from).run();
            for u in reachable.iter_set_bits() {
                for v in graph.neighbors_of(u) {
                    prop_assert!(from.paths[v as usize].len <= from.paths[u as usize].len + 1);
                }
            }
        }
    }
}
