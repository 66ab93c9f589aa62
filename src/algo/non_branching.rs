use super::*;

pub trait NonBranchingPaths: ArcList + DirectedAdjacencyList {
    /// Decomposes the arcs of a directed graph into maximal non-branching paths.
    ///
    /// A node is *non-branching* if it has exactly one incoming and one outgoing arc.
    /// Every arc leaving a branching node starts a path which is extended as long as it
    /// reaches non-branching nodes. Afterwards, every cycle consisting only of non-branching
    /// nodes that was not touched is reported as closed path, starting from its largest node.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(7, [(0, 1), (1, 2), (2, 3), (2, 4), (5, 6), (6, 5)]);
    /// assert_eq!(
    ///     g.maximal_non_branching_paths(),
    ///     vec![vec![0, 1, 2], vec![2, 3], vec![2, 4], vec![6, 5, 6]]
    /// );
    /// ```
    fn maximal_non_branching_paths(&self) -> Vec<Vec<Node>> {
        let in_degrees = self.in_degrees();
        let is_one_one =
            |u: Node| in_degrees[u as usize] == 1 && self.degree_of(u) == 1;

        let mut untouched = self.vertex_bitset_set();
        let mut paths = Vec::new();

        for v in self.vertices() {
            if is_one_one(v) {
                continue;
            }

            untouched.clear_bit(v);
            for mut w in self.neighbors_of(v) {
                let mut path = vec![v, w];
                untouched.clear_bit(w);

                while is_one_one(w) {
                    w = self.ith_neighbor(w, 0);
                    path.push(w);
                    untouched.clear_bit(w);
                }

                paths.push(path);
            }
        }

        for v in self.vertices().rev() {
            if !untouched.get_bit(v) || !is_one_one(v) {
                continue;
            }

            let mut cycle = vec![v];
            let mut w = v;
            loop {
                w = self.ith_neighbor(w, 0);
                untouched.clear_bit(w);
                cycle.push(w);
                if w == v {
                    break;
                }
            }

            paths.push(cycle);
        }

        paths
    }
}

impl<G> NonBranchingPaths for G where G: ArcList + DirectedAdjacencyList {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::arb_edge_list;
    use proptest::prelude::*;

    #[test]
    fn paths_and_isolated_cycle() {
        let g = AdjArray::from_edges(7, [(0, 1), (1, 2), (2, 3), (2, 4), (5, 6), (6, 5)]);
        assert_eq!(
            g.maximal_non_branching_paths(),
            vec![vec![0, 1, 2], vec![2, 3], vec![2, 4], vec![6, 5, 6]]
        );
    }

    #[test]
    fn isolated_nodes_and_loops() {
        let g = AdjArray::from_edges(3, [(1, 1)]);
        assert_eq!(g.maximal_non_branching_paths(), vec![vec![1, 1]]);

        assert!(AdjArray::new(4).maximal_non_branching_paths().is_empty());
    }

    #[test]
    fn cycle_through_branching_node() {
        let g = AdjArray::from_edges(4, [(0, 1), (1, 2), (2, 0), (0, 3)]);
        assert_eq!(
            g.maximal_non_branching_paths(),
            vec![vec![0, 1, 2, 0], vec![0, 3]]
        );
    }

    proptest! {
        #[test]
        fn every_arc_exactly_once((n, edges) in arb_edge_list(10, 20)) {
            let g = AdjArray::from_edges(n, edges);
            let paths = g.maximal_non_branching_paths();

            let used = paths
                .iter()
                .flat_map(|p| p.iter().copied().tuple_windows::<(_, _)>())
                .map(|(u, v)| Edge(u, v))
                .sorted()
                .collect_vec();
            prop_assert_eq!(used, g.ordered_edges(false));
        }
    }
}
