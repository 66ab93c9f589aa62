/// Every graph should implement `GraphNodeOrder` and `GraphEdgeOrder`
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident, $undirected:literal, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{ops::*, repr::*, testing::test_graph_ops, *};
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use itertools::Itertools;

            /// Creates a list of at most `m_ub` random edges for nodes `0..n`
            fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, m_ub: NumEdges) -> Vec<Edge> {
                let mut edges: Vec<Edge> = (0..m_ub).map(|_| {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);

                    if $undirected {
                        Edge(u, v).normalized()
                    } else {
                        Edge(u, v)
                    }
                }).collect_vec();
                edges.sort_unstable();
                edges.dedup();

                edges
            }

            $(
                test_graph_ops!($graph<$undirected>: $trait);
            )*
        }
    };
    ($graph:ident<$undirected:literal>: GraphNew) => {
        #[test]
        fn graph_new() {
            for n in 0..50 {
                let graph = <$graph>::new(n);

                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.number_of_nodes(), n);
                assert_eq!(graph.is_empty(), n == 0);

                assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                assert_eq!(graph.arc_size(), 0);
                assert!(graph.bounds_ok());
            }
        }
    };
    ($graph:ident<$undirected:literal>: AdjacencyList) => {
        #[test]
        fn test_adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                for m_ub in [n * 2, n * 5, n * 10] {
                    for _ in 0..10 {
                        let edges = random_edges(rng, n, m_ub as NumEdges);

                        let mut adj_matrix: Vec<NodeBitSet> = vec![NodeBitSet::new(n); n as usize];
                        for &Edge(u, v) in &edges {
                            adj_matrix[u as usize].set_bit(v);

                            if $undirected {
                                adj_matrix[v as usize].set_bit(u);
                            }
                        }

                        let graph = <$graph>::from_edges(n, edges.iter());
                        let m = edges.len() as NumEdges;

                        assert_eq!(graph.number_of_nodes(), n);
                        assert_eq!(graph.number_of_edges(), m);
                        assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                        assert!(graph.bounds_ok());

                        assert_eq!(edges, graph.ordered_edges($undirected));

                        for u in 0..n {
                            assert_eq!(graph.neighbors_of_as_bitset(u), adj_matrix[u as usize]);
                            assert_eq!(graph.degree_of(u), adj_matrix[u as usize].cardinality());
                            assert_eq!(graph.arcs_of(u).len(), graph.degree_of(u) as usize);
                        }
                    }
                }
            }
        }
    };
    ($graph:ident<$undirected:literal>: DirectedAdjacencyList) => {
        #[test]
        fn test_directed_adjacency_list() {
            assert!(!$undirected);

            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                for m_ub in [n * 2, n * 5, n * 10] {
                    for _ in 0..10 {
                        let edges = random_edges(rng, n, m_ub as NumEdges);

                        let mut adj_matrix_in: Vec<NodeBitSet> = vec![NodeBitSet::new(n); n as usize];
                        for &Edge(u, v) in &edges {
                            adj_matrix_in[v as usize].set_bit(u);
                        }

                        let graph = <$graph>::from_edges(n, edges.iter());
                        let transposed = graph.transpose();
                        let in_degrees = graph.in_degrees();

                        for u in 0..n {
                            assert_eq!(transposed.neighbors_of_as_bitset(u), adj_matrix_in[u as usize]);
                            assert_eq!(graph.in_degree_of(u), adj_matrix_in[u as usize].cardinality());
                            assert_eq!(in_degrees[u as usize], adj_matrix_in[u as usize].cardinality());
                        }
                    }
                }
            }
        }
    };
    ($graph:ident<$undirected:literal>: GraphEdgeEditing) => {
        #[test]
        fn test_graph_edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                for m_ub in [n * 2, n * 5, n * 10] {
                    for _ in 0..10 {
                        let edges = random_edges(rng, n, m_ub as NumEdges);

                        let mut graph = <$graph>::new(n);

                        let mut adj_matrix: Vec<NodeBitSet> = vec![NodeBitSet::new(n); n as usize];

                        for &Edge(u, v) in &edges {
                            adj_matrix[u as usize].set_bit(v);
                            graph.add_edge(u, v);

                            if $undirected {
                                adj_matrix[v as usize].set_bit(u);
                            }
                        }

                        let rng = &mut Pcg64Mcg::seed_from_u64(4);

                        let mut m = graph.number_of_edges();
                        for _ in 0..(m / 2) {
                            let u = rng.random_range(0..n);
                            let v = rng.random_range(0..n);

                            if adj_matrix[u as usize].clear_bit(v) {
                                assert!(graph.try_remove_edge(u, v));
                                m -= 1;

                                if $undirected && u != v {
                                    assert!(adj_matrix[v as usize].clear_bit(u));
                                }
                            } else {
                                assert!(!graph.try_remove_edge(u, v));
                            }

                            assert_eq!(m, graph.number_of_edges());
                        }

                        for u in 0..n {
                            assert_eq!(graph.neighbors_of_as_bitset(u), adj_matrix[u as usize]);
                        }
                    }
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;

/// Strategy for a node count in `1..=max_nodes` together with up to `max_edges` edges on these nodes
#[cfg(test)]
pub(crate) fn arb_edge_list(
    max_nodes: crate::NumNodes,
    max_edges: usize,
) -> impl proptest::strategy::Strategy<Value = (crate::NumNodes, Vec<(crate::Node, crate::Node)>)> {
    use proptest::prelude::*;

    (1..=max_nodes).prop_flat_map(move |n| {
        (
            Just(n),
            proptest::collection::vec((0..n, 0..n), 0..=max_edges),
        )
    })
}

/// Sorts the nodes in each component increasingly and then the components themselves lexicographically.
#[cfg(test)]
pub(crate) fn sort_components(mut components: Vec<Vec<crate::Node>>) -> Vec<Vec<crate::Node>> {
    components.iter_mut().for_each(|comp| comp.sort_unstable());
    components.sort_unstable();
    components
}
