use crate::{repr::macros::impl_common_graph_ops, testing::test_graph_ops};

use super::*;

/// An undirected graph representation.
///
/// Every edge `{u, v}` is stored as the arcs `u -> v` and `v -> u`; a loop
/// `{u, u}` is stored as a single arc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndirectedGraph<A: ArcTarget> {
    arcs: Vec<Vec<A>>,
    num_edges: NumEdges,
}

/// Representation using an unlabeled Adjacency-Array
pub type AdjArrayUndir = UndirectedGraph<Node>;

/// Representation using a labeled Adjacency-Array
pub type LabeledAdjArrayUndir = UndirectedGraph<Half>;

impl_common_graph_ops!(UndirectedGraph => arcs, Undirected);

impl<A: ArcTarget> UndirectedGraph<A> {
    /// Wraps externally built arc lists without validating them.
    /// The lists are expected to be symmetric with loops stored once.
    pub fn from_adjacency(arcs: Vec<Vec<A>>) -> Self {
        let mut graph = Self { arcs, num_edges: 0 };
        graph.num_edges = graph.edge_size();
        graph
    }
}

impl GraphEdgeEditing for UndirectedGraph<Node> {
    fn add_edge(&mut self, u: Node, v: Node) {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        self.arcs[u as usize].push(v);
        if u != v {
            self.arcs[v as usize].push(u);
        }
        self.num_edges += 1;
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        let Some(pos) = self.arcs[u as usize].iter().position(|&w| w == v) else {
            return false;
        };
        self.arcs[u as usize].remove(pos);

        if u != v {
            let pos = self.arcs[v as usize].iter().position(|&w| w == u);
            debug_assert!(pos.is_some());
            if let Some(pos) = pos {
                self.arcs[v as usize].remove(pos);
            }
        }

        self.num_edges -= 1;
        true
    }
}

impl LabeledEdgeEditing for UndirectedGraph<Half> {
    fn add_labeled_edge(&mut self, u: Node, v: Node, label: Label) {
        assert!(u < self.number_of_nodes() && v < self.number_of_nodes());
        self.arcs[u as usize].push(Half::new(v, label));
        if u != v {
            self.arcs[v as usize].push(Half::new(u, label));
        }
        self.num_edges += 1;
    }
}

test_graph_ops!(
    test_adj_array_undir,
    AdjArrayUndir,
    true,
    (GraphNew, AdjacencyList, GraphEdgeEditing)
);
