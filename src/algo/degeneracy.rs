use super::*;

/// The result of repeatedly removing a node of minimum remaining degree.
///
/// - `k` is the degeneracy of the graph: the largest minimum degree seen during the removal.
/// - `ordering` lists all nodes in the order they were removed.
/// - `cores` has `k + 1` entries. `cores[i]` is the number of nodes removed before the minimum
///   degree first exceeded `i`; the last entry equals the number of nodes. Hence
///   `ordering[cores[i - 1]..]` is the `i`-core of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degeneracy {
    pub k: NumNodes,
    pub ordering: Vec<Node>,
    pub cores: Vec<NumNodes>,
}

impl Degeneracy {
    /// Returns the nodes that belong to the `i`-core but not to the `(i+1)`-core.
    /// ** Panics if `i > k` **
    pub fn shell(&self, i: NumNodes) -> &[Node] {
        let end = self.cores[i as usize] as usize;
        let begin = if i == 0 {
            0
        } else {
            self.cores[i as usize - 1] as usize
        };
        &self.ordering[begin..end]
    }

    /// Returns the nodes of the `i`-core, i.e. the maximal subgraph of minimum degree `i`.
    /// ** Panics if `i > k` **
    pub fn core(&self, i: NumNodes) -> &[Node] {
        assert!(i <= self.k);
        if i == 0 {
            &self.ordering
        } else {
            &self.ordering[self.cores[i as usize - 1] as usize..]
        }
    }
}

pub trait DegeneracyOrdering: AdjacencyList + GraphType<Dir = Undirected> {
    /// Computes a degeneracy ordering with bucketed degrees.
    ///
    /// In each step, the last node of the first non-empty degree bucket is removed and each of
    /// its remaining neighbors moves one bucket down. Degrees are arc counts, so a loop counts
    /// once and parallel edges count individually.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 0), (2, 3)]);
    /// let deg = g.degeneracy();
    ///
    /// assert_eq!(deg.k, 2);
    /// assert_eq!(deg.ordering, vec![3, 2, 0, 1]);
    /// assert_eq!(deg.core(2), &[2, 0, 1]);
    /// ```
    fn degeneracy(&self) -> Degeneracy {
        let n = self.len();

        let mut degree = self.degrees().collect_vec();
        let mut buckets: Vec<Vec<Node>> = vec![Vec::new(); self.max_degree() as usize + 1];
        let mut pos = vec![0usize; n];
        for u in self.vertices() {
            let bucket = &mut buckets[degree[u as usize] as usize];
            pos[u as usize] = bucket.len();
            bucket.push(u);
        }

        let mut removed = self.vertex_bitset_unset();
        let mut ordering = Vec::with_capacity(n);
        let mut cores: Vec<NumNodes> = vec![0];
        let mut k = 0;

        for removed_so_far in 0..n as NumNodes {
            let Some(i) = buckets.iter().position(|b| !b.is_empty()) else {
                break;
            };

            if i as NumNodes > k {
                cores.resize(i + 1, 0);
                for c in &mut cores[k as usize..i] {
                    *c = removed_so_far;
                }
                k = i as NumNodes;
            }

            let Some(v) = buckets[i].pop() else {
                break;
            };
            ordering.push(v);
            removed.set_bit(v);

            for w in self.neighbors_of(v) {
                if removed.get_bit(w) {
                    continue;
                }

                let d = degree[w as usize] as usize;
                let p = pos[w as usize];
                buckets[d].swap_remove(p);
                if let Some(&moved) = buckets[d].get(p) {
                    pos[moved as usize] = p;
                }

                degree[w as usize] -= 1;
                pos[w as usize] = buckets[d - 1].len();
                buckets[d - 1].push(w);
            }
        }

        cores[k as usize] = n as NumNodes;

        Degeneracy { k, ordering, cores }
    }
}

impl<G> DegeneracyOrdering for G where G: AdjacencyList + GraphType<Dir = Undirected> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::arb_edge_list;
    use proptest::prelude::*;

    fn sample() -> AdjArrayUndir {
        AdjArrayUndir::from_edges(
            7,
            [
                (0, 1),
                (0, 2),
                (0, 4),
                (0, 6),
                (1, 2),
                (1, 4),
                (1, 6),
                (6, 2),
                (6, 4),
                (3, 2),
                (3, 4),
                (3, 5),
            ],
        )
    }

    #[test]
    fn ordering_and_cores() {
        let deg = sample().degeneracy();
        assert_eq!(deg.k, 3);
        assert_eq!(deg.ordering, vec![5, 3, 4, 6, 2, 1, 0]);
        assert_eq!(deg.cores, vec![0, 1, 2, 7]);

        assert!(deg.shell(0).is_empty());
        assert_eq!(deg.shell(1), &[5]);
        assert_eq!(deg.shell(2), &[3]);
        assert_eq!(deg.shell(3), &[4, 6, 2, 1, 0]);
        assert_eq!(deg.core(2), &[3, 4, 6, 2, 1, 0]);
        assert_eq!(deg.core(0).len(), 7);
    }

    #[test]
    fn empty_and_isolated() {
        let deg = AdjArrayUndir::new(0).degeneracy();
        assert_eq!(deg.k, 0);
        assert!(deg.ordering.is_empty());
        assert_eq!(deg.cores, vec![0]);

        let deg = AdjArrayUndir::new(3).degeneracy();
        assert_eq!(deg.k, 0);
        assert_eq!(deg.ordering, vec![2, 1, 0]);
        assert_eq!(deg.cores, vec![3]);
    }

    #[test]
    fn cores_skip_degrees() {
        let mut g = AdjArrayUndir::new(4);
        for (u, v) in (0..4).tuple_combinations() {
            g.add_edge(u, v);
        }

        let deg = g.degeneracy();
        assert_eq!(deg.k, 3);
        assert_eq!(deg.cores, vec![0, 0, 0, 4]);
        assert_eq!(deg.shell(3).len(), 4);
        assert!(deg.shell(1).is_empty());
    }

    proptest! {
        #[test]
        fn removal_degrees((n, edges) in arb_edge_list(15, 40)) {
            let edges = edges.into_iter().filter(|(u, v)| u != v).collect_vec();
            let g = AdjArrayUndir::from_edges(n, edges);
            let deg = g.degeneracy();

            prop_assert_eq!(deg.ordering.iter().copied().sorted().collect_vec(), g.vertices().collect_vec());
            prop_assert_eq!(deg.cores.len(), deg.k as usize + 1);
            prop_assert_eq!(*deg.cores.last().unwrap(), n);
            prop_assert!(deg.cores.iter().tuple_windows().all(|(a, b)| a <= b));

            // remaining degree at removal time never exceeds k and reaches it at least once
            let mut removed = g.vertex_bitset_unset();
            let mut max_seen = 0;
            for (i, &u) in deg.ordering.iter().enumerate() {
                let remaining = g.neighbors_of(u).filter(|&v| !removed.get_bit(v)).count() as NumNodes;
                prop_assert!(remaining <= deg.k);
                if (i as NumNodes) < deg.cores[0] {
                    prop_assert_eq!(remaining, 0);
                }
                max_seen = max_seen.max(remaining);
                removed.set_bit(u);
            }
            prop_assert_eq!(max_seen, deg.k);
        }
    }
}
