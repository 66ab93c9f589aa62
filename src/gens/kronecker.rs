use fxhash::FxHashSet;
use rand::seq::SliceRandom;

use super::*;

/// Graph500-style Kronecker (recursive matrix) graphs.
///
/// `edge_factor * 2^scale` candidate edges are drawn by recursively choosing one of the four
/// quadrants of the adjacency matrix with the initiator probabilities `(a, b, c, 1 - a - b - c)`.
/// Candidates are shuffled, loops and parallel edges are dropped, and the non-isolated nodes are
/// relabeled randomly to `0..n`. Hence the result has at most `2^scale` nodes, no isolated nodes,
/// and is not necessarily connected.
///
/// # Examples
/// ```
/// use adjgraphs::{prelude::*, gens::*};
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64Mcg;
///
/// let rng = &mut Pcg64Mcg::seed_from_u64(1);
/// let g: AdjArrayUndir = Kronecker::new().scale(8).edge_factor(4.0).generate(rng);
///
/// assert!(g.number_of_nodes() <= 256);
/// assert!(g.vertices().all(|u| g.degree_of(u) > 0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Kronecker {
    scale: u32,
    edge_factor: f64,
    initiator: (f64, f64, f64),
}

impl Default for Kronecker {
    fn default() -> Self {
        Self {
            scale: 0,
            edge_factor: 16.0,
            initiator: (0.57, 0.19, 0.19),
        }
    }
}

impl Kronecker {
    /// Creates a new generator with edge factor `16` and the Graph500 initiator `(0.57, 0.19, 0.19)`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node extent to `2^scale`
    pub fn scale(mut self, scale: u32) -> Self {
        assert!(scale < Node::BITS, "Scale exceeds the node range!");
        self.scale = scale;
        self
    }

    /// Sets the number of candidate edges per node of the extent
    pub fn edge_factor(mut self, edge_factor: f64) -> Self {
        assert!(edge_factor >= 0.0, "Edge factor must be non-negative!");
        self.edge_factor = edge_factor;
        self
    }

    /// Sets the probabilities of the upper-left, upper-right and lower-left quadrant
    pub fn initiator(mut self, a: f64, b: f64, c: f64) -> Self {
        assert!(
            [a, b, c, a + b + c].iter().all(|p| p.is_valid_probability()),
            "Initiator probabilities must sum to at most 1!"
        );
        assert!(a + b < 1.0, "Initiator must leave room for the lower half!");
        self.initiator = (a, b, c);
        self
    }

    /// Draws the candidate pairs without loops in shuffled order, together with the bitset of
    /// all endpoints of these pairs
    fn candidates<R: Rng>(&self, rng: &mut R) -> (Vec<(Node, Node)>, NodeBitSet) {
        let extent: NumNodes = 1 << self.scale;
        let num_candidates = self.num_candidates();

        let (a, b, c) = self.initiator;
        let ab = a + b;
        let c_norm = c / (1.0 - ab);
        let a_norm = a / ab;

        let mut used = NodeBitSet::new(extent);
        let mut pairs: Vec<(Node, Node)> = Vec::with_capacity(num_candidates);

        for _ in 0..num_candidates {
            let mut i: Node = 0;
            let mut j: Node = 0;
            let mut bit: Node = 1;
            while bit < extent {
                if rng.random::<f64>() > ab {
                    i |= bit;
                    if rng.random::<f64>() > c_norm {
                        j |= bit;
                    }
                } else if rng.random::<f64>() > a_norm {
                    j |= bit;
                }
                bit <<= 1;
            }

            if i == j {
                continue;
            }

            used.set_bit(i);
            used.set_bit(j);

            // inside-out shuffle
            let k = pairs.len();
            let r = rng.random_range(0..=k);
            if r == k {
                pairs.push((i, j));
            } else {
                pairs.push(pairs[r]);
                pairs[r] = (i, j);
            }
        }

        (pairs, used)
    }

    /// Generates a graph without loops and parallel edges.
    /// For undirected graphs, `{u, v}` and `{v, u}` are considered parallel.
    pub fn generate<G, R>(&self, rng: &mut R) -> G
    where
        G: GraphFromScratch + GraphType,
        R: Rng,
    {
        let (pairs, used) = self.candidates(rng);

        let n = used.cardinality();
        let mut ids = (0..n).collect::<Vec<Node>>();
        ids.shuffle(rng);

        let mut relabel = vec![INVALID_NODE; 1usize << self.scale];
        for (old, new) in used.iter_set_bits().zip(ids) {
            relabel[old as usize] = new;
        }

        let mut seen: FxHashSet<Edge> = FxHashSet::default();
        let edges = pairs
            .into_iter()
            .map(|(i, j)| Edge(relabel[i as usize], relabel[j as usize]))
            .filter(|e| seen.insert(if G::is_undirected() { e.normalized() } else { *e }))
            .collect::<Vec<_>>();

        debug!(
            "Kronecker generator kept {} of {} candidates on {n} nodes",
            edges.len(),
            self.num_candidates()
        );

        G::from_edges(n, edges)
    }

    fn num_candidates(&self) -> usize {
        (self.edge_factor * (1u64 << self.scale) as f64).round() as usize
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn simple_without_isolated_nodes() {
        let rng = &mut Pcg64Mcg::seed_from_u64(8);

        for scale in [1, 4, 8] {
            let g: AdjArray = Kronecker::new().scale(scale).edge_factor(4.0).generate(rng);
            assert!(g.number_of_nodes() <= 1 << scale);
            assert!(g.bounds_ok());

            let edges = g.ordered_edges(false);
            assert!(edges.iter().all(|e| !e.is_loop()));
            assert!(edges.iter().tuple_windows().all(|(a, b)| a != b));

            let in_degrees = g.in_degrees();
            assert!(g.vertices().all(|u| g.degree_of(u) + in_degrees[u as usize] > 0));
        }
    }

    #[test]
    fn undirected_simple() {
        let rng = &mut Pcg64Mcg::seed_from_u64(6);
        let g: AdjArrayUndir = Kronecker::new().scale(7).edge_factor(8.0).generate(rng);

        assert!(g.number_of_nodes() <= 128);
        assert_eq!(g.number_of_loops(), 0);
        for u in g.vertices() {
            assert!(g.degree_of(u) > 0);
            let neighbors = g.neighbors_of(u).sorted().collect_vec();
            assert!(neighbors.iter().tuple_windows().all(|(a, b)| a != b));
        }
    }

    #[test]
    fn loops_leave_no_isolated_nodes() {
        for seed in 0..2000 {
            let rng = &mut Pcg64Mcg::seed_from_u64(seed);
            let g: AdjArrayUndir = Kronecker::new().scale(2).edge_factor(1.0).generate(rng);

            assert!(g.number_of_nodes() <= 4);
            assert_eq!(g.number_of_loops(), 0);
            assert!(
                g.vertices().all(|u| g.degree_of(u) > 0),
                "seed {seed}: {:?}",
                g.ordered_edges(true)
            );
        }

        for seed in 0..500 {
            let rng = &mut Pcg64Mcg::seed_from_u64(seed);
            let g: AdjArray = Kronecker::new().scale(2).edge_factor(1.0).generate(rng);
            let in_degrees = g.in_degrees();
            assert!(g.vertices().all(|u| g.degree_of(u) + in_degrees[u as usize] > 0));
        }
    }

    #[test]
    fn no_candidates() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let g: AdjArray = Kronecker::new().scale(3).edge_factor(0.0).generate(rng);
        assert!(g.is_empty());
    }

    #[test]
    #[should_panic]
    fn invalid_initiator() {
        Kronecker::new().initiator(0.6, 0.3, 0.3);
    }
}
