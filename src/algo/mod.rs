/*!
# Graph Algorithms

This module provides the **graph algorithms** of this crate, built on top of the graph representations in [`crate::repr`].
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use adjgraphs::algo::*;
```
and gain access to traversal, connectivity, orderings, Eulerian walks and clique enumeration.
Most algorithms are traits implemented for every suitable graph; components are provided as
**iterators**, so they can be consumed lazily.
*/

mod bipartite;
mod cliques;
mod connectivity;
mod degeneracy;
mod eulerian;
mod from_list;
mod non_branching;
mod topological;
mod traversal;

use itertools::Itertools;

use crate::prelude::*;

pub use bipartite::*;
pub use cliques::*;
pub use connectivity::*;
pub use degeneracy::*;
pub use eulerian::*;
pub use from_list::*;
pub use non_branching::*;
pub use topological::*;
pub use traversal::*;
