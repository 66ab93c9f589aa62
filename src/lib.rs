/*!
`adjgraphs` is a library of classic graph algorithms on compact adjacency-list graphs.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
A graph is a list of arc lists: the arcs of node `u` are stored at index `u`.
Arcs are either plain target nodes or labeled [`Half`](crate::repr::Half) arcs whose label is an
index into some caller-owned table (weights, names, ...).
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`.

Parallel arcs and loops are allowed everywhere.

### Directed vs Undirected

- In a **directed** graph, every arc `u -> v` is stored once at `u`.
- In an **undirected** graph, every edge `{u, v}` is stored as the two reciprocal arcs
  `u -> v` and `v -> u`. A loop `{u, u}` is stored as a single arc.

See the [`repr`] module for [`AdjArray`](crate::repr::AdjArray),
[`AdjArrayUndir`](crate::repr::AdjArrayUndir) and their labeled variants.

# Design

Traversals are configured structs using the *Builder* pattern: pick the outputs you need
(visited set, node visitor, arc visitor, from-list, ...) and call `run`.
Everything else is implemented via traits on the graph itself, so
`graph.strongly_connected_components()` or `graph.degeneracy()` work without any setup.

Visitors return `bool`: returning *false* aborts the running algorithm, which then reports
the abort by returning *false* itself.

# Usage

- [`prelude`] includes definitions for nodes, edges, errors, basic graph operations and all representations,
- [`algo`] includes traversal, components, orderings, Eulerian walks and maximal cliques,
- [`gens`] includes random generators for Euclidean, geometric and Kronecker graphs.

In most use-cases, `use adjgraphs::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

pub use edge::*;
pub use error::*;
pub use node::*;

/// `adjgraphs::prelude` includes definitions for nodes, edges and errors, all basic graph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, error::*, node::*, ops::*, repr::*};
}
