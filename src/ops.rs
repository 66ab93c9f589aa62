/*!
# Graph Operations

Traits describing what a graph can do, independent of how it is stored.
Algorithms in [`crate::algo`] are written against these traits and
implemented directly on every graph that satisfies them.
*/

use std::ops::Range;

use itertools::Itertools;

use crate::{
    repr::{ArcTarget, Label},
    *,
};

/// Marker for the orientation of a graph
pub trait GraphDir {
    /// Returns *true* for directed graphs
    fn is_directed() -> bool;
}

/// Edges have an orientation: `Edge(u, v) != Edge(v, u)`
pub struct Directed;

/// Edges are stored as two reciprocal arcs (loops only once)
pub struct Undirected;

impl GraphDir for Directed {
    fn is_directed() -> bool {
        true
    }
}

impl GraphDir for Undirected {
    fn is_directed() -> bool {
        false
    }
}

/// Associates a graph with its orientation
pub trait GraphType {
    type Dir: GraphDir;

    /// Returns *true* if the graph is directed
    fn is_directed() -> bool {
        Self::Dir::is_directed()
    }

    /// Returns *true* if the graph is undirected
    fn is_undirected() -> bool {
        !Self::is_directed()
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns full bitset with one entry per node
    fn vertex_bitset_set(&self) -> NodeBitSet {
        NodeBitSet::new_all_set(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph.
    /// For undirected graphs every edge is counted once, loops included.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton_graph(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// Parallel arcs yield the same neighbor multiple times.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of arcs stored at `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over the degrees of all nodes
    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns the neighbors of `u` as a bitset
    /// ** Panics if `u >= n` **
    fn neighbors_of_as_bitset(&self, u: Node) -> NodeBitSet {
        NodeBitSet::new_with_bits_set(self.number_of_nodes(), self.neighbors_of(u))
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns all edges in the graph in sorted order.
    fn ordered_edges(&self, only_normalized: bool) -> Vec<Edge> {
        let mut edges = self.edges(only_normalized).collect_vec();
        edges.sort_unstable();
        edges
    }

    /// Returns the number of stored arcs.
    ///
    /// For undirected graphs without loops this is twice the number of edges.
    fn arc_size(&self) -> NumEdges {
        self.degrees().map(|d| d as NumEdges).sum()
    }

    /// Returns the first arc (in node and list order) whose target lies outside `0..n`.
    fn find_out_of_bounds_arc(&self) -> Option<Edge> {
        let n = self.number_of_nodes();
        self.edges(false).find(|&Edge(_, v)| v >= n)
    }

    /// Returns *true* if every arc points to a node in `0..n`
    fn bounds_ok(&self) -> bool {
        self.find_out_of_bounds_arc().is_none()
    }

    /// Returns *true* if `u` has an arc to itself
    /// ** Panics if `u >= n` **
    fn has_loop(&self, u: Node) -> bool {
        self.neighbors_of(u).any(|v| v == u)
    }
}

/// Slice access to the raw (possibly labeled) arcs of a node
pub trait ArcList: AdjacencyList {
    type Arc: ArcTarget;

    /// Returns the arcs stored at `u` in insertion order
    /// ** Panics if `u >= n` **
    fn arcs_of(&self, u: Node) -> &[Self::Arc];

    /// Returns the target of the `i`-th arc of `u`
    /// ** Panics if `u >= n || i >= deg(u)` **
    fn ith_neighbor(&self, u: Node, i: usize) -> Node {
        self.arcs_of(u)[i].target()
    }

    /// Copies all arc lists
    fn arc_lists(&self) -> Vec<Vec<Self::Arc>> {
        self.vertices().map(|u| self.arcs_of(u).to_vec()).collect()
    }

    /// Consumes the graph and returns its arc lists
    fn into_arc_lists(self) -> Vec<Vec<Self::Arc>>;
}

macro_rules! propagate {
    ($out_fn:ident => $fn:ident($($arg:ident : $type:ty),*) -> $ret:ty) => {
        #[inline]
        fn $out_fn(&self, $($arg: $type),*) -> $ret {
            self.$fn($($arg),*)
        }
    };
}

/// Accessors only meaningful for directed graphs
pub trait DirectedAdjacencyList: AdjacencyList {
    propagate!(out_neighbors_of => neighbors_of(u : Node) -> impl Iterator<Item = Node> + '_);
    propagate!(out_degree_of => degree_of(u : Node) -> NumNodes);

    /// Returns the in-degree of every node, computed with a single scan over all arcs
    fn in_degrees(&self) -> Vec<NumNodes> {
        let mut in_degs = vec![0; self.len()];
        for Edge(_, v) in self.edges(false) {
            in_degs[v as usize] += 1;
        }
        in_degs
    }

    /// Returns the number of arcs into `u`.
    /// This scans the whole graph; use [`DirectedAdjacencyList::in_degrees`] for all nodes.
    /// ** Panics if `u >= n` **
    fn in_degree_of(&self, u: Node) -> NumNodes {
        assert!(u < self.number_of_nodes());
        self.edges(false).filter(|&Edge(_, v)| v == u).count() as NumNodes
    }

    /// Returns *true* if every node has equal in- and out-degree
    fn balanced(&self) -> bool {
        self.in_degrees()
            .into_iter()
            .zip(self.degrees())
            .all(|(din, dout)| din == dout)
    }

    /// Returns the fraction of possible arcs (without loops) present in the graph
    fn arc_density(&self) -> f64 {
        let n = self.number_of_nodes() as f64;
        self.arc_size() as f64 / (n * (n - 1.0))
    }

    /// Returns a graph with every arc `u -> v` replaced by `v -> u` (labels are kept)
    fn transpose(&self) -> Self;
}

/// Accessors only meaningful for undirected graphs
pub trait UndirectedAdjacencyList: AdjacencyList {
    /// Returns the number of incident edges of `u` where loops count twice
    /// ** Panics if `u >= n` **
    fn degree_with_loops_of(&self, u: Node) -> NumNodes {
        self.degree_of(u) + self.neighbors_of(u).filter(|&v| v == u).count() as NumNodes
    }

    /// Returns the number of loops in the graph
    fn number_of_loops(&self) -> NumEdges {
        self.vertices()
            .map(|u| self.neighbors_of(u).filter(|&v| v == u).count() as NumEdges)
            .sum()
    }

    /// Returns the number of edges derived from the stored arcs
    fn edge_size(&self) -> NumEdges {
        (self.arc_size() + self.number_of_loops()) / 2
    }

    /// Returns the fraction of possible edges (without loops) present in the graph
    fn density(&self) -> f64 {
        let n = self.number_of_nodes() as f64;
        2.0 * self.edge_size() as f64 / (n * (n - 1.0))
    }
}

impl<G> UndirectedAdjacencyList for G where G: AdjacencyList + GraphType<Dir = Undirected> {}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the edge (u,v) exists in the graph.
    /// ** Panics if `u >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;
}

impl<G: AdjacencyList> AdjacencyTest for G {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.neighbors_of(u).any(|w| w == v)
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert/delete unlabeled edges
pub trait GraphEdgeEditing: GraphNew {
    /// Adds the edge *(u,v)* to the graph.
    /// Parallel edges are allowed, the graph becomes a multigraph.
    /// ** Panics if `u >= n || v >= n` **
    fn add_edge(&mut self, u: Node, v: Node);

    /// Adds all edges in the collection
    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.add_edge(u, v);
        }
    }

    /// Removes one occurrence of the edge *(u,v)* from the graph.
    /// If the edge was removed, returns *true* and *false* otherwise.
    /// ** Panics if `u >= n || v >= n` **
    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool;

    /// Removes the edge *(u,v)* from the graph.
    /// ** Panics if the edge is not present or `u, v >= n` **
    fn remove_edge(&mut self, u: Node, v: Node) {
        assert!(self.try_remove_edge(u, v));
    }
}

/// Provides functions to insert labeled edges
pub trait LabeledEdgeEditing: GraphNew {
    /// Adds the edge *(u,v)* carrying `label` to the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn add_labeled_edge(&mut self, u: Node, v: Node, label: Label);
}

/// A super trait for creating a graph from scratch from a set of edges and a number of nodes
pub trait GraphFromScratch {
    /// Create a graph from a number of nodes and an iterator over Edges
    fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self {
        let mut graph = Self::new(n);
        graph.add_edges(edges);
        graph
    }
}
