/*!
# Graph Representations

All graphs are adjacency arrays: one `Vec` of arcs per node. An arc is either
a plain target [`Node`] or a labeled [`Half`] arc carrying a [`Label`]. Both
implement [`ArcTarget`], so every algorithm runs unchanged on labeled and
unlabeled graphs.

- [`AdjArray`] / [`LabeledAdjArray`]: directed graphs storing out-arcs.
- [`AdjArrayUndir`] / [`LabeledAdjArrayUndir`]: undirected graphs storing
  every edge as two reciprocal arcs (loops are stored once).

Parallel arcs are allowed everywhere.
*/

use std::fmt::Debug;

use crate::{ops::*, *};

mod directed;
mod undirected;

pub use directed::*;
pub use undirected::*;

/// Arc labels are indices into some caller-owned table (e.g. weights)
pub type Label = u32;

/// An arc as stored in an adjacency array
pub trait ArcTarget: Copy + Debug + Eq {
    /// Returns the node this arc points to
    fn target(&self) -> Node;

    /// Returns a copy of this arc pointing to `to` instead (labels are kept)
    fn with_target(self, to: Node) -> Self;

    /// Returns *true* if `other`, stored at the target of `self`, is the reverse
    /// copy of `self` stored at `from`
    fn is_reverse_of(&self, other: &Self, from: Node) -> bool;
}

impl ArcTarget for Node {
    #[inline]
    fn target(&self) -> Node {
        *self
    }

    #[inline]
    fn with_target(self, to: Node) -> Self {
        to
    }

    #[inline]
    fn is_reverse_of(&self, other: &Self, from: Node) -> bool {
        *other == from
    }
}

/// A labeled arc: the target node and the label of the arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Half {
    pub to: Node,
    pub label: Label,
}

impl Half {
    pub fn new(to: Node, label: Label) -> Self {
        Self { to, label }
    }
}

impl ArcTarget for Half {
    #[inline]
    fn target(&self) -> Node {
        self.to
    }

    #[inline]
    fn with_target(self, to: Node) -> Self {
        Self { to, ..self }
    }

    #[inline]
    fn is_reverse_of(&self, other: &Self, from: Node) -> bool {
        other.to == from && other.label == self.label
    }
}

pub(crate) mod macros {
    macro_rules! impl_common_graph_ops {
        ($struct:ident => $arcs:ident, $directed:ident) => {
            impl<A: ArcTarget> GraphType for $struct<A> {
                type Dir = $directed;
            }

            impl<A: ArcTarget> GraphNodeOrder for $struct<A> {
                fn number_of_nodes(&self) -> NumNodes {
                    self.$arcs.len() as NumNodes
                }
            }

            impl<A: ArcTarget> GraphEdgeOrder for $struct<A> {
                fn number_of_edges(&self) -> NumEdges {
                    self.num_edges
                }
            }

            impl<A: ArcTarget> AdjacencyList for $struct<A> {
                fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
                    self.$arcs[u as usize].iter().map(|a| a.target())
                }

                fn degree_of(&self, u: Node) -> NumNodes {
                    self.$arcs[u as usize].len() as NumNodes
                }
            }

            impl<A: ArcTarget> ArcList for $struct<A> {
                type Arc = A;

                fn arcs_of(&self, u: Node) -> &[A] {
                    &self.$arcs[u as usize]
                }

                fn into_arc_lists(self) -> Vec<Vec<A>> {
                    self.$arcs
                }
            }

            impl<A: ArcTarget> GraphNew for $struct<A> {
                fn new(n: NumNodes) -> Self {
                    Self {
                        num_edges: 0,
                        $arcs: vec![Vec::new(); n as usize],
                    }
                }
            }
        };
    }

    pub(super) use impl_common_graph_ops;
}
