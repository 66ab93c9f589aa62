/*!
# Directed Graph Representations

[`DirectedGraph`] stores the out-arcs of every node. In-arcs are derived on
demand by scanning all nodes, or all at once via [`DirectedAdjacencyList::transpose`].
*/

use crate::{repr::macros::impl_common_graph_ops, testing::test_graph_ops};

use super::*;

/// A directed graph storing only **outgoing arcs**.
///
/// # Type parameters
/// - `A`: [`ArcTarget`] stored per arc (plain [`Node`] or labeled [`Half`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedGraph<A: ArcTarget> {
    out_arcs: Vec<Vec<A>>,
    num_edges: NumEdges,
}

/// Directed graph using unlabeled adjacency arrays
pub type AdjArray = DirectedGraph<Node>;

/// Directed graph using labeled adjacency arrays
pub type LabeledAdjArray = DirectedGraph<Half>;

impl_common_graph_ops!(DirectedGraph => out_arcs, Directed);

impl<A: ArcTarget> DirectedGraph<A> {
    /// Wraps externally built arc lists without validating them.
    /// Use [`AdjacencyList::find_out_of_bounds_arc`] before running algorithms on it.
    pub fn from_adjacency(out_arcs: Vec<Vec<A>>) -> Self {
        let num_edges = out_arcs.iter().map(|arcs| arcs.len() as NumEdges).sum();
        Self {
            out_arcs,
            num_edges,
        }
    }
}

impl<A: ArcTarget> DirectedAdjacencyList for DirectedGraph<A> {
    fn transpose(&self) -> Self {
        let mut out_arcs = vec![Vec::new(); self.out_arcs.len()];
        for (u, arcs) in self.out_arcs.iter().enumerate() {
            for a in arcs {
                out_arcs[a.target() as usize].push(a.with_target(u as Node));
            }
        }

        Self {
            out_arcs,
            num_edges: self.num_edges,
        }
    }
}

impl GraphEdgeEditing for DirectedGraph<Node> {
    fn add_edge(&mut self, u: Node, v: Node) {
        assert!(v < self.number_of_nodes());
        self.out_arcs[u as usize].push(v);
        self.num_edges += 1;
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        let arcs = &mut self.out_arcs[u as usize];
        if let Some(pos) = arcs.iter().position(|&w| w == v) {
            arcs.remove(pos);
            self.num_edges -= 1;
            true
        } else {
            false
        }
    }
}

impl LabeledEdgeEditing for DirectedGraph<Half> {
    fn add_labeled_edge(&mut self, u: Node, v: Node, label: Label) {
        assert!(v < self.number_of_nodes());
        self.out_arcs[u as usize].push(Half::new(v, label));
        self.num_edges += 1;
    }
}

// ---------- Testing ----------

test_graph_ops!(
    test_adj_array,
    AdjArray,
    false,
    (
        GraphNew,
        AdjacencyList,
        DirectedAdjacencyList,
        GraphEdgeEditing
    )
);
