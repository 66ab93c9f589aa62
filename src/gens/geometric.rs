use super::*;

/// Random geometric (unit-disc) graphs.
///
/// Nodes are placed uniformly at random on the unit square and every pair of nodes with
/// distance less than `radius` is connected by an undirected edge.
/// The expected degree is roughly `n * π * radius²`.
///
/// # Examples
/// ```
/// use adjgraphs::{prelude::*, gens::*};
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64Mcg;
///
/// let rng = &mut Pcg64Mcg::seed_from_u64(1);
/// let embedded = Geometric::new().nodes(100).radius(0.1).generate(rng);
///
/// for Edge(u, v) in embedded.graph.edges(true) {
///     assert!(embedded.positions[u as usize].distance(&embedded.positions[v as usize]) < 0.1);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Geometric {
    nodes: NumNodes,
    radius: f64,
}

impl Geometric {
    /// Creates a new generator with radius `0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the connection radius
    pub fn radius(mut self, radius: f64) -> Self {
        assert!(radius >= 0.0, "Radius must be non-negative!");
        self.radius = radius;
        self
    }

    /// Sets the radius such that the expected degree is roughly `deg`
    pub fn avg_deg(self, deg: f64) -> Self {
        assert!(self.nodes > 0, "Set the number of nodes first!");
        let area = deg / self.nodes as f64;
        assert!(
            area.is_valid_probability(),
            "The average degree is invalid for the given n!"
        );
        self.radius((area / std::f64::consts::PI).sqrt())
    }

    /// Generates an undirected simple graph together with the node positions
    pub fn generate<R: Rng>(&self, rng: &mut R) -> EmbeddedGraph<AdjArrayUndir> {
        let EmbeddedGraph {
            graph, positions, ..
        } = self.generate_labeled(rng);

        EmbeddedGraph {
            graph: AdjArrayUndir::from_adjacency(strip_labels(graph.into_arc_lists())),
            positions,
            weights: Vec::new(),
        }
    }

    /// Generates an undirected simple graph whose `i`-th edge is labeled `i`.
    /// `weights[i]` is the length of the `i`-th edge.
    pub fn generate_labeled<R: Rng>(&self, rng: &mut R) -> EmbeddedGraph<LabeledAdjArrayUndir> {
        let positions = random_positions(rng, self.nodes);
        let mut graph = LabeledAdjArrayUndir::new(self.nodes);
        let mut weights = Vec::new();

        for (u, pu) in positions.iter().enumerate() {
            for (v, pv) in positions.iter().enumerate().skip(u + 1) {
                let dist = pu.distance(pv);
                if dist < self.radius {
                    graph.add_labeled_edge(u as Node, v as Node, weights.len() as Label);
                    weights.push(dist);
                }
            }
        }

        EmbeddedGraph {
            graph,
            positions,
            weights,
        }
    }
}

impl NumNodesGen for Geometric {
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
    fn unit_disc() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        for radius in [0.0, 0.05, 0.2, 2.0] {
            let embedded = Geometric::new().nodes(60).radius(radius).generate(rng);
            let g = &embedded.graph;
            let pos = &embedded.positions;

            assert_eq!(g.number_of_nodes(), 60);
            assert!(g.bounds_ok());
            assert_eq!(g.number_of_loops(), 0);

            for (u, v) in (0..60 as Node).tuple_combinations() {
                let close = pos[u as usize].distance(&pos[v as usize]) < radius;
                assert_eq!(g.has_edge(u, v), close);
                assert_eq!(g.has_edge(v, u), close);
            }

            if radius == 0.0 {
                assert_eq!(g.number_of_edges(), 0);
            }
            if radius == 2.0 {
                assert_eq!(g.number_of_edges(), 60 * 59 / 2);
            }
        }
    }

    #[test]
    fn labels_index_weights() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let embedded = Geometric::new().nodes(40).avg_deg(5.0).generate_labeled(rng);

        assert_eq!(embedded.weights.len() as NumEdges, embedded.graph.number_of_edges());
        for u in embedded.graph.vertices() {
            for half in embedded.graph.arcs_of(u) {
                let dist = embedded.positions[u as usize].distance(&embedded.positions[half.to as usize]);
                assert_eq!(embedded.weights[half.label as usize], dist);
            }
        }
    }
}
