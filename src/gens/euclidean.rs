use rand_distr::Exp1;

use super::*;

/// Random directed simple graphs on the Euclidean plane.
///
/// Nodes are placed uniformly at random on the unit square. Candidate arcs between distinct random
/// nodes are rejected if they are *too far*, i.e. if `distance * affinity` exceeds an
/// exponentially distributed random value, or if they are parallel to an existing arc.
/// The generator gives up once `arcs * patience` candidates were rejected for one of the reasons.
///
/// # Examples
/// ```
/// use adjgraphs::{prelude::*, gens::*};
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64Mcg;
///
/// let rng = &mut Pcg64Mcg::seed_from_u64(1);
/// let embedded = Euclidean::new().nodes(20).arcs(50).affinity(2.0).patience(10).generate(rng).unwrap();
///
/// assert_eq!(embedded.graph.number_of_edges(), 50);
/// assert_eq!(embedded.positions.len(), 20);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Euclidean {
    nodes: NumNodes,
    arcs: NumEdges,
    affinity: f64,
    patience: u32,
}

impl Default for Euclidean {
    fn default() -> Self {
        Self {
            nodes: 0,
            arcs: 0,
            affinity: 1.0,
            patience: 1,
        }
    }
}

impl Euclidean {
    /// Creates a new generator with affinity `1.0` and patience `1`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of arcs of the generated graph
    pub fn arcs(mut self, m: NumEdges) -> Self {
        self.arcs = m;
        self
    }

    /// Sets the bias towards connecting nearby nodes; `0.0` disables the bias
    pub fn affinity(mut self, affinity: f64) -> Self {
        assert!(affinity >= 0.0, "Affinity must be non-negative!");
        self.affinity = affinity;
        self
    }

    /// Sets the number of rejections per requested arc before the generator gives up
    pub fn patience(mut self, patience: u32) -> Self {
        self.patience = patience;
        self
    }

    /// Generates a directed simple graph together with the node positions
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<EmbeddedGraph<AdjArray>, GeneratorError> {
        let EmbeddedGraph {
            graph, positions, ..
        } = self.generate_labeled(rng)?;

        Ok(EmbeddedGraph {
            graph: AdjArray::from_adjacency(strip_labels(graph.into_arc_lists())),
            positions,
            weights: Vec::new(),
        })
    }

    /// Generates a directed simple graph whose `i`-th arc is labeled `i`.
    /// `weights[i]` is the length of the `i`-th arc.
    pub fn generate_labeled<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<EmbeddedGraph<LabeledAdjArray>, GeneratorError> {
        let n = self.nodes;
        let m = self.arcs;
        assert!(
            m == 0 || n >= 2,
            "At least two nodes are required to place an arc!"
        );

        let positions = random_positions(rng, n);
        let mut out_arcs: Vec<Vec<Half>> = vec![Vec::new(); n as usize];
        let mut weights = Vec::with_capacity(m as usize);

        let max_rejections = m as u64 * self.patience as u64;
        let mut too_far = 0u64;
        let mut parallel = 0u64;

        while weights.len() < m as usize {
            if too_far == max_rejections {
                debug!("Euclidean generator gave up after {too_far} arcs were too far");
                return Err(GeneratorError::AffinityNotFound);
            }
            if parallel == max_rejections {
                debug!("Euclidean generator gave up after {parallel} parallel arcs");
                return Err(GeneratorError::Overcrowding);
            }

            let u = rng.random_range(0..n);
            let v = loop {
                let v = rng.random_range(0..n);
                if v != u {
                    break v;
                }
            };

            let dist = positions[u as usize].distance(&positions[v as usize]);
            let threshold: f64 = rng.sample(Exp1);
            if dist * self.affinity > threshold {
                too_far += 1;
                continue;
            }

            if out_arcs[u as usize].iter().any(|h| h.to == v) {
                parallel += 1;
                continue;
            }

            out_arcs[u as usize].push(Half::new(v, weights.len() as Label));
            weights.push(dist);
        }

        Ok(EmbeddedGraph {
            graph: LabeledAdjArray::from_adjacency(out_arcs),
            positions,
            weights,
        })
    }
}

impl NumNodesGen for Euclidean {
    fn nodes(mut self, n: NumNodes) -> Self {
        self.nodes = n;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn simple_and_complete() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for (n, m) in [(2, 2), (10, 30), (50, 200)] {
            let embedded = Euclidean::new()
                .nodes(n)
                .arcs(m)
                .affinity(1.5)
                .patience(50)
                .generate(rng)
                .unwrap();
            let g = embedded.graph;

            assert_eq!(g.number_of_nodes(), n);
            assert_eq!(g.number_of_edges(), m);
            assert_eq!(g.arc_size(), m);
            assert!(g.bounds_ok());
            assert!(embedded.weights.is_empty());

            let edges = g.ordered_edges(false);
            assert!(edges.iter().all(|e| !e.is_loop()));
            assert!(edges.iter().tuple_windows().all(|(a, b)| a != b));

            assert!(
                embedded
                    .positions
                    .iter()
                    .all(|p| (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y))
            );
        }
    }

    #[test]
    fn labels_index_weights() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        let embedded = Euclidean::new()
            .nodes(30)
            .arcs(60)
            .patience(20)
            .generate_labeled(rng)
            .unwrap();

        assert_eq!(embedded.weights.len(), 60);

        let mut labels = Vec::new();
        for u in embedded.graph.vertices() {
            for half in embedded.graph.arcs_of(u) {
                let dist = embedded.positions[u as usize].distance(&embedded.positions[half.to as usize]);
                assert_eq!(embedded.weights[half.label as usize], dist);
                labels.push(half.label);
            }
        }
        labels.sort_unstable();
        assert_eq!(labels, (0..60).collect_vec());
    }

    #[test]
    fn same_graph_labeled_and_unlabeled() {
        let generator = Euclidean::new().nodes(15).arcs(40).patience(20);
        let plain = generator
            .generate(&mut Pcg64Mcg::seed_from_u64(9))
            .unwrap();
        let labeled = generator
            .generate_labeled(&mut Pcg64Mcg::seed_from_u64(9))
            .unwrap();

        assert_eq!(plain.positions, labeled.positions);
        for u in plain.graph.vertices() {
            assert_eq!(
                plain.graph.neighbors_of(u).collect_vec(),
                labeled.graph.neighbors_of(u).collect_vec()
            );
        }
    }

    #[test]
    fn give_up() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        assert_eq!(
            Euclidean::new()
                .nodes(2)
                .arcs(3)
                .affinity(0.0)
                .generate(rng)
                .unwrap_err(),
            GeneratorError::Overcrowding
        );

        assert_eq!(
            Euclidean::new()
                .nodes(10)
                .arcs(5)
                .affinity(1e12)
                .patience(3)
                .generate(rng)
                .unwrap_err(),
            GeneratorError::AffinityNotFound
        );
    }

    #[test]
    fn no_arcs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        let embedded = Euclidean::new().nodes(1).generate(rng).unwrap();
        assert_eq!(embedded.graph.number_of_nodes(), 1);
        assert_eq!(embedded.graph.number_of_edges(), 0);
    }
}
