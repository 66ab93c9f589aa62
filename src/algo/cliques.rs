/*!
# Maximal Cliques

Bron–Kerbosch enumeration of all maximal cliques of an undirected graph.

- [`MaximalCliques::bron_kerbosch1`] branches on every candidate,
- [`MaximalCliques::bron_kerbosch2`] only branches on candidates that are not adjacent to a pivot,
- [`MaximalCliques::bron_kerbosch3`] additionally processes the outermost level in degeneracy order.

Cliques are reported as increasing node lists to a callback; returning *false* from the
callback stops the enumeration. Loops are ignored, parallel edges are harmless.

```
use adjgraphs::{prelude::*, algo::*};

// 0--4--5-
//    |  | \
//    3--2--1
let g = AdjArrayUndir::from_edges(6, [(0, 4), (4, 5), (4, 3), (3, 2), (5, 2), (5, 1), (2, 1)]);

let mut cliques = Vec::new();
g.bron_kerbosch3(PivotMaxDegree, |c| {
    cliques.push(c.to_vec());
    true
});
assert_eq!(cliques, vec![vec![0, 4], vec![3, 4], vec![4, 5], vec![2, 3], vec![1, 2, 5]]);
```
*/

use super::*;

/// Chooses the pivot of a Bron–Kerbosch step.
/// The returned node must be contained in `p` or `x`; `p` is never empty.
pub trait PivotSelector {
    fn select_pivot<G: AdjacencyList>(&mut self, graph: &G, p: &NodeBitSet, x: &NodeBitSet) -> Node;
}

/// Picks the node of maximum degree from `p` and then `x`; ties go to the first node found
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotMaxDegree;

impl PivotSelector for PivotMaxDegree {
    fn select_pivot<G: AdjacencyList>(&mut self, graph: &G, p: &NodeBitSet, x: &NodeBitSet) -> Node {
        let mut candidates = p.iter_set_bits().chain(x.iter_set_bits());

        let mut best = candidates.next().unwrap_or(INVALID_NODE);
        let mut best_degree = if best == INVALID_NODE {
            0
        } else {
            graph.degree_of(best)
        };

        for u in candidates {
            let d = graph.degree_of(u);
            if d > best_degree {
                best = u;
                best_degree = d;
            }
        }

        best
    }
}

/// Picks the smallest node of `p`
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotFirstOfP;

impl PivotSelector for PivotFirstOfP {
    fn select_pivot<G: AdjacencyList>(&mut self, _: &G, p: &NodeBitSet, _: &NodeBitSet) -> Node {
        p.iter_set_bits().next().unwrap_or(INVALID_NODE)
    }
}

/// Uses a closure `(p, x) -> pivot` as pivot rule
pub struct PivotFn<F>(pub F);

impl<F> PivotSelector for PivotFn<F>
where
    F: FnMut(&NodeBitSet, &NodeBitSet) -> Node,
{
    fn select_pivot<G: AdjacencyList>(&mut self, _: &G, p: &NodeBitSet, x: &NodeBitSet) -> Node {
        (self.0)(p, x)
    }
}

pub trait MaximalCliques: AdjacencyList + GraphType<Dir = Undirected> {
    /// Enumerates all maximal cliques without pivoting.
    /// Returns *false* if `emit` stopped the enumeration.
    fn bron_kerbosch1(&self, emit: impl FnMut(&[Node]) -> bool) -> bool {
        let mut search = CliqueSearch::<_, PivotFirstOfP, _>::new(self, None, emit);
        search.expand(
            self.vertex_bitset_unset(),
            self.vertex_bitset_set(),
            self.vertex_bitset_unset(),
        )
    }

    /// Enumerates all maximal cliques, branching only on candidates outside the neighborhood
    /// of the pivot chosen by `pivot`.
    /// Returns *false* if `emit` stopped the enumeration.
    ///
    /// ** Panics if `pivot` returns a node outside of `P ∪ X` **
    fn bron_kerbosch2<S: PivotSelector>(&self, pivot: S, emit: impl FnMut(&[Node]) -> bool) -> bool {
        let mut search = CliqueSearch::new(self, Some(pivot), emit);
        search.expand(
            self.vertex_bitset_unset(),
            self.vertex_bitset_set(),
            self.vertex_bitset_unset(),
        )
    }

    /// Like [`MaximalCliques::bron_kerbosch2`], but the outermost level visits the nodes in
    /// degeneracy order, which bounds its branching by the degeneracy of the graph.
    fn bron_kerbosch3<S: PivotSelector>(&self, pivot: S, emit: impl FnMut(&[Node]) -> bool) -> bool {
        let ordering = self.degeneracy().ordering;

        let mut search = CliqueSearch::new(self, Some(pivot), emit);
        let mut r = self.vertex_bitset_unset();
        let mut p = self.vertex_bitset_set();
        let mut x = self.vertex_bitset_unset();

        for u in ordering {
            r.set_bit(u);
            let (p2, x2) = search.restrict_to_neighbors(u, &p, &x);
            if !search.expand(r.clone(), p2, x2) {
                return false;
            }
            r.clear_bit(u);
            p.clear_bit(u);
            x.set_bit(u);
        }

        true
    }

    /// Returns all maximal cliques as found by [`MaximalCliques::bron_kerbosch3`] with
    /// [`PivotMaxDegree`].
    /// Unlike the first two variants, which report the empty clique of a graph without nodes,
    /// the result is empty in that case.
    fn maximal_cliques(&self) -> Vec<Vec<Node>> {
        let mut cliques = Vec::new();
        self.bron_kerbosch3(PivotMaxDegree, |c| {
            cliques.push(c.to_vec());
            true
        });
        cliques
    }
}

impl<G> MaximalCliques for G where G: AdjacencyList + GraphType<Dir = Undirected> {}

struct CliqueSearch<'a, G, S, E> {
    graph: &'a G,
    pivot: Option<S>,
    emit: E,
    clique: Vec<Node>,
}

impl<'a, G, S, E> CliqueSearch<'a, G, S, E>
where
    G: AdjacencyList,
    S: PivotSelector,
    E: FnMut(&[Node]) -> bool,
{
    fn new(graph: &'a G, pivot: Option<S>, emit: E) -> Self {
        Self {
            graph,
            pivot,
            emit,
            clique: Vec::new(),
        }
    }

    /// Returns `(P ∩ N(u), X ∩ N(u))` excluding `u` itself
    fn restrict_to_neighbors(&self, u: Node, p: &NodeBitSet, x: &NodeBitSet) -> (NodeBitSet, NodeBitSet) {
        let mut p2 = self.graph.vertex_bitset_unset();
        let mut x2 = self.graph.vertex_bitset_unset();

        for v in self.graph.neighbors_of(u) {
            if v == u {
                continue;
            }
            if p.get_bit(v) {
                p2.set_bit(v);
            }
            if x.get_bit(v) {
                x2.set_bit(v);
            }
        }

        (p2, x2)
    }

    fn expand(&mut self, r: NodeBitSet, mut p: NodeBitSet, mut x: NodeBitSet) -> bool {
        debug_assert!(disjoint(&r, &p) && disjoint(&r, &x) && disjoint(&p, &x));

        if p.cardinality() == 0 {
            if x.cardinality() > 0 {
                return true;
            }

            self.clique.clear();
            self.clique.extend(r.iter_set_bits());
            return (self.emit)(self.clique.as_slice());
        }

        let mut candidates = p.clone();
        if let Some(selector) = self.pivot.as_mut() {
            let u = selector.select_pivot(self.graph, &p, &x);
            assert!(
                u < self.graph.number_of_nodes() && (p.get_bit(u) || x.get_bit(u)),
                "pivot {u} is not contained in P or X"
            );

            for v in self.graph.neighbors_of(u).filter(|&v| v != u) {
                candidates.clear_bit(v);
            }
        }

        for u in candidates.iter_set_bits() {
            let mut r2 = r.clone();
            r2.set_bit(u);
            let (p2, x2) = self.restrict_to_neighbors(u, &p, &x);

            if !self.expand(r2, p2, x2) {
                return false;
            }

            p.clear_bit(u);
            x.set_bit(u);
        }

        true
    }
}

fn disjoint(a: &NodeBitSet, b: &NodeBitSet) -> bool {
    a.iter_set_bits().all(|u| !b.get_bit(u))
}
