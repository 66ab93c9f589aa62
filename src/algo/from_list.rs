/*!
# Spanning Forests as Parent Pointers

A [`FromList`] stores, for every node, the node it was reached from and the
length of the path from its root. It is the natural output of a traversal
(see [`DepthFirst::from_list`](super::DepthFirst::from_list)) and the
natural encoding of a rooted tree.

Lengths are 1-based: a root has length `1`, a node that was never reached
has length `0`.
*/

use super::*;

/// Parent pointer and path length of a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathEnd {
    /// Node this node was reached from; `None` for roots and unreached nodes
    pub from: Option<Node>,
    /// Number of nodes on the path from the root to this node (`0` if unreached)
    pub len: NumNodes,
}

impl PathEnd {
    pub fn new(from: Option<Node>, len: NumNodes) -> Self {
        Self { from, len }
    }
}

/// A forest encoded as parent pointers.
#[derive(Debug, Clone, PartialEq)]
pub struct FromList {
    /// One entry per node
    pub paths: Vec<PathEnd>,
    /// Nodes without recorded children
    pub leaves: NodeBitSet,
    /// Maximum of all `paths[u].len`
    pub max_len: NumNodes,
}

impl FromList {
    /// Creates a list for `n` nodes with no node reached yet
    pub fn new(n: NumNodes) -> Self {
        Self {
            paths: vec![PathEnd::default(); n as usize],
            leaves: NodeBitSet::new(n),
            max_len: 0,
        }
    }

    /// Number of nodes covered by the list
    pub fn number_of_nodes(&self) -> NumNodes {
        self.paths.len() as NumNodes
    }

    /// Records that `u` was reached from `from` (or is a root if `from` is `None`).
    /// The length of `u` is derived from the length of `from`.
    pub(crate) fn record(&mut self, u: Node, from: Option<Node>) {
        let len = match from {
            Some(p) => {
                self.leaves.clear_bit(p);
                self.paths[p as usize].len + 1
            }
            None => 1,
        };

        self.paths[u as usize] = PathEnd::new(from, len);
        self.leaves.set_bit(u);
        self.max_len = self.max_len.max(len);
    }

    /// Returns the path from the root of `end` to `end`, both included.
    /// The path is empty if `end` was never reached.
    /// ** Panics if `end >= n` **
    pub fn path_to(&self, end: Node) -> Vec<Node> {
        let len = self.paths[end as usize].len as usize;
        let mut path = Vec::with_capacity(len);

        let mut u = end;
        while path.len() < len {
            path.push(u);
            match self.paths[u as usize].from {
                Some(p) => u = p,
                None => break,
            }
        }

        path.reverse();
        path
    }

    /// Follows the parent pointers of `u` to the root of its tree
    /// ** Panics if `u >= n` **
    pub fn root_of(&self, mut u: Node) -> Node {
        // lengths strictly decrease towards the root, so the walk ends
        // even if the pointers were edited by hand into a cycle
        let mut steps = self.paths.len();
        while let Some(p) = self.paths[u as usize].from {
            if steps == 0 {
                break;
            }
            steps -= 1;
            u = p;
        }
        u
    }

    /// Returns the deepest node that lies on the root paths of both `a` and `b`,
    /// or `None` if they belong to different trees.
    /// ** Panics if `a >= n || b >= n` **
    pub fn common_ancestor(&self, mut a: Node, mut b: Node) -> Option<Node> {
        let len = |u: Node| self.paths[u as usize].len;
        if len(a) < len(b) {
            std::mem::swap(&mut a, &mut b);
        }

        while len(a) > len(b) {
            a = self.paths[a as usize].from?;
        }

        while a != b {
            a = self.paths[a as usize].from?;
            b = self.paths[b as usize].from?;
        }

        Some(a)
    }

    /// Recomputes `leaves` from the parent pointers: a node is a leaf iff no
    /// other node points to it.
    pub fn recalc_leaves(&mut self) {
        self.leaves = NodeBitSet::new_all_set(self.number_of_nodes());
        for path in &self.paths {
            if let Some(p) = path.from {
                self.leaves.clear_bit(p);
            }
        }
    }

    /// Recomputes all lengths and `max_len` from the parent pointers.
    /// Every node without a parent is treated as a root.
    pub fn recalc_len(&mut self) {
        for path in &mut self.paths {
            path.len = 0;
        }

        let mut on_chain = NodeBitSet::new(self.number_of_nodes());
        self.max_len = 0;
        for u in 0..self.number_of_nodes() {
            let len = self.settle_len(u, &mut on_chain);
            self.max_len = self.max_len.max(len);
        }
    }

    /// Assigns lengths to `u` and all of its ancestors that have none yet and
    /// returns the length of `u`. Parent pointers forming a cycle are cut at
    /// the first repeated node.
    fn settle_len(&mut self, u: Node, on_chain: &mut NodeBitSet) -> NumNodes {
        let mut chain = Vec::new();
        let mut v = u;
        let mut len = loop {
            let path = self.paths[v as usize];
            if path.len > 0 {
                break path.len;
            }
            if on_chain.set_bit(v) {
                break 0;
            }
            chain.push(v);

            match path.from {
                Some(p) => v = p,
                None => break 0,
            }
        };

        for &w in chain.iter().rev() {
            len += 1;
            self.paths[w as usize].len = len;
            on_chain.clear_bit(w);
        }

        len
    }

    /// Returns the tree as a directed graph with arcs pointing from parents to children
    pub fn transpose(&self) -> AdjArray {
        AdjArray::from_edges(
            self.number_of_nodes(),
            self.paths
                .iter()
                .enumerate()
                .filter_map(|(v, path)| path.from.map(|u| Edge(u, v as Node))),
        )
    }
}

/// Tree recognition and conversion for directed graphs
pub trait DirectedTrees: ArcList + GraphType<Dir = Directed> {
    /// Interprets the graph as a forest with arcs pointing from parents to children.
    ///
    /// Every arc `u -> v` sets the parent of `v` to `u` (later arcs win), leaves are
    /// the nodes without out-arcs and lengths are walked up from the leaves.
    /// Results may not be meaningful for graphs that are not forests.
    fn to_from_list(&self) -> FromList {
        let n = self.number_of_nodes();
        let mut from = FromList::new(n);
        from.leaves = self.vertex_bitset_set();

        for u in self.vertices() {
            for v in self.neighbors_of(u) {
                from.paths[v as usize].from = Some(u);
                from.leaves.clear_bit(u);
            }
        }

        let mut on_chain = NodeBitSet::new(n);
        for u in from.leaves.iter_set_bits().collect_vec() {
            let len = from.settle_len(u, &mut on_chain);
            from.max_len = from.max_len.max(len);
        }

        from
    }

    /// Returns *true* if the subgraph reachable from `root` is a tree,
    /// i.e. no node is reached twice. The rest of the graph is not inspected.
    /// ** Panics if `root >= n` **
    fn is_tree_directed(&self, root: Node) -> bool {
        let mut visited = self.vertex_bitset_unset();
        visited.set_bit(root);

        let mut stack = vec![(root, 0usize)];
        while let Some((u, next)) = stack.last_mut() {
            let Some(arc) = self.arcs_of(*u).get(*next) else {
                stack.pop();
                continue;
            };
            *next += 1;

            let v = arc.target();
            if visited.set_bit(v) {
                return false;
            }
            stack.push((v, 0));
        }

        true
    }
}

impl<G> DirectedTrees for G where G: ArcList + GraphType<Dir = Directed> {}

struct TreeFrame {
    parent: Option<Node>,
    node: Node,
    next: usize,
}

/// Tree recognition and conversion for undirected graphs
pub trait UndirectedTrees: ArcList + GraphType<Dir = Undirected> {
    /// Builds the [`FromList`] of the depth-first spanning tree of the component
    /// containing `root`.
    ///
    /// Returns `Err(v)` if the component is not a tree, where `v` is the node that
    /// was reached a second time. Loops and parallel edges count as cycles.
    /// Nodes outside the component stay unreached.
    /// ** Panics if `root >= n` **
    fn from_list_rooted(&self, root: Node) -> Result<FromList, Node> {
        let mut from = FromList::new(self.number_of_nodes());
        from.record(root, None);

        let mut stack = vec![TreeFrame {
            parent: None,
            node: root,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;
            let Some(arc) = self.arcs_of(u).get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            let v = arc.target();
            // every arc back to the parent is the tree edge itself
            if Some(v) == frame.parent {
                continue;
            }
            if from.paths[v as usize].len > 0 {
                return Err(v);
            }

            from.record(v, Some(u));
            stack.push(TreeFrame {
                parent: Some(u),
                node: v,
                next: 0,
            });
        }

        Ok(from)
    }

    /// Returns `(is_tree, all_tree)`: `is_tree` is *true* if the component
    /// containing `root` is a tree, `all_tree` is additionally *true* if that
    /// component spans the whole graph.
    /// ** Panics if `root >= n` **
    fn is_tree(&self, root: Node) -> (bool, bool) {
        let mut unvisited = self.vertex_bitset_set();
        unvisited.clear_bit(root);

        let mut stack = vec![TreeFrame {
            parent: None,
            node: root,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;
            let Some(arc) = self.arcs_of(u).get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            let v = arc.target();
            if Some(v) == frame.parent {
                continue;
            }
            if !unvisited.clear_bit(v) {
                return (false, false);
            }

            stack.push(TreeFrame {
                parent: Some(u),
                node: v,
                next: 0,
            });
        }

        (true, unvisited.cardinality() == 0)
    }
}

impl<G> UndirectedTrees for G where G: ArcList + GraphType<Dir = Undirected> {}
