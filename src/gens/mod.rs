/*!
# Graph Generators

Random graph generators configured with the *Builder* pattern. All generators draw from a
caller-provided [`rand::Rng`]; they never seed randomness on their own.

1. Create a generator instance (e.g., `Euclidean::new()`).
2. Set parameters (e.g., `.nodes(n).arcs(m).affinity(2.0)`).
3. Call `generate(rng)` (or one of its labeled variants).

Supported models:
- [`Euclidean`]: directed simple graphs on random points of the unit square, biased towards
  connecting nearby nodes,
- [`Geometric`]: undirected unit-disc graphs on random points of the unit square,
- [`Kronecker`]: Graph500-style recursive-matrix graphs without loops, parallel edges or isolated nodes.
*/

use log::debug;
use rand::Rng;

use crate::{prelude::*, utils::*};

mod euclidean;
mod geometric;
mod kronecker;

pub use euclidean::*;
pub use geometric::*;
pub use kronecker::*;

/// Trait for generators that allow setting the number of nodes.
///
/// Allows a fluent interface when configuring generators.
pub trait NumNodesGen {
    /// Sets the number of nodes in the graph generator.
    fn nodes(self, n: NumNodes) -> Self;
}

/// A point in the unit square
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Returns the Euclidean distance to `other`
    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A generated graph together with the positions of its nodes and the weights its labels refer to.
/// For unlabeled graphs, `weights` is empty.
#[derive(Debug, Clone)]
pub struct EmbeddedGraph<G> {
    pub graph: G,
    pub positions: Vec<Position>,
    pub weights: Vec<f64>,
}

/// Draws `n` positions uniformly at random from the unit square
fn random_positions<R: Rng>(rng: &mut R, n: NumNodes) -> Vec<Position> {
    (0..n)
        .map(|_| Position {
            x: rng.random(),
            y: rng.random(),
        })
        .collect()
}

/// Removes the labels of all arcs
fn strip_labels(arcs: Vec<Vec<Half>>) -> Vec<Vec<Node>> {
    arcs.into_iter()
        .map(|list| list.into_iter().map(|h| h.to).collect())
        .collect()
}
