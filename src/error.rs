/*!
# Errors

Result-level failures of the algorithms in this crate. Structural invalidity
(out-of-bounds arcs) is reported as a witness [`Edge`](crate::Edge) instead,
and cancellation by a visitor is a plain `bool`.
*/

use thiserror::Error;

use crate::Node;

/// Reasons why no Eulerian cycle or path could be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EulerianError {
    /// A sub-walk did not return to the node it started from.
    #[error("not balanced")]
    NotBalanced,

    /// The walk finished but some nodes were never reached.
    #[error("not strongly connected")]
    NotStronglyConnected,
}

/// A topological order was requested for a graph that contains a cycle.
///
/// The nodes in `cycle` are a witness of the cyclicity; see the producing
/// method for the exact shape of the witness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("graph is cyclic ({} nodes reported on a cycle)", .cycle.len())]
pub struct NotAcyclic {
    pub cycle: Vec<Node>,
}

/// A random generator gave up before producing the requested graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Too many candidate arcs were rejected for being too far apart.
    #[error("affinity not found")]
    AffinityNotFound,

    /// Too many candidate arcs were rejected for being parallel to existing arcs.
    #[error("overcrowding")]
    Overcrowding,
}
