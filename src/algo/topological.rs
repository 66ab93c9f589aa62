/*!
# Topological Orderings

Topological sorting of directed graphs either by depth-first search or by Kahn's algorithm.
Both fail with [`NotAcyclic`] on cyclic graphs and never return a partial order.
*/

use log::debug;

use super::*;

pub trait TopologicalSort: ArcList + DirectedAdjacencyList {
    /// Computes a topological order by a three-color depth-first search started from every
    /// node in increasing order. The order is the reverse of the finishing order.
    ///
    /// On a cyclic graph, the error contains the first cycle found: the nodes along the
    /// search path from the repeated node onwards, so every node has an arc to its successor
    /// and the last node has an arc to the first.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjArray::from_edges(7, [(2, 0), (1, 0), (0, 3), (0, 4), (0, 5), (3, 6)]);
    /// assert_eq!(g.topological_order().unwrap(), vec![2, 1, 0, 5, 4, 3, 6]);
    ///
    /// g.add_edge(6, 2);
    /// assert_eq!(g.topological_order().unwrap_err().cycle, vec![0, 3, 6, 2]);
    /// ```
    fn topological_order(&self) -> Result<Vec<Node>, NotAcyclic> {
        let mut order = vec![INVALID_NODE; self.len()];
        let mut pos = order.len();

        three_color_search(self, |u| {
            pos -= 1;
            order[pos] = u;
        })
        .map_err(|cycle| {
            debug!("Topological sort found a cycle of length {}", cycle.len());
            NotAcyclic { cycle }
        })?;

        Ok(order)
    }

    /// Computes a topological order with Kahn's algorithm.
    /// `transpose` must be the transpose of `self`; only its degrees are used.
    ///
    /// Nodes without incoming arcs are processed last-in first-out, starting with the
    /// sources in increasing order.
    ///
    /// On a cyclic graph, the error contains every node that still has unprocessed incoming
    /// arcs and an out-neighbor in the same situation, in increasing order. These nodes
    /// include every cycle of the graph but do not necessarily form a closed walk themselves.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjArray::from_edges(7, [(2, 0), (1, 0), (0, 3), (0, 4), (0, 5), (3, 6)]);
    /// assert_eq!(g.topological_kahn(&g.transpose()).unwrap(), vec![2, 1, 0, 5, 4, 3, 6]);
    ///
    /// g.add_edge(6, 2);
    /// assert_eq!(g.topological_kahn(&g.transpose()).unwrap_err().cycle, vec![0, 2, 3, 6]);
    /// ```
    fn topological_kahn<T: AdjacencyList>(&self, transpose: &T) -> Result<Vec<Node>, NotAcyclic> {
        assert_eq!(transpose.number_of_nodes(), self.number_of_nodes());

        let mut remaining = transpose.degrees().collect_vec();
        let mut sources = self
            .vertices()
            .filter(|&u| remaining[u as usize] == 0)
            .collect_vec();
        let mut order = Vec::with_capacity(self.len());

        while let Some(u) = sources.pop() {
            order.push(u);
            for v in self.neighbors_of(u) {
                let rem = &mut remaining[v as usize];
                if *rem > 0 {
                    *rem -= 1;
                    if *rem == 0 {
                        sources.push(v);
                    }
                }
            }
        }

        if order.len() == self.len() {
            return Ok(order);
        }

        let cycle = self
            .vertices()
            .filter(|&u| {
                remaining[u as usize] > 0
                    && self.neighbors_of(u).any(|v| remaining[v as usize] > 0)
            })
            .collect_vec();

        debug!(
            "Kahn's algorithm stopped with {} of {} nodes ordered",
            order.len(),
            self.len()
        );
        Err(NotAcyclic { cycle })
    }

    /// Returns *true* if the graph contains a directed cycle (loops included)
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjArray::from_edges(3, [(0, 1), (1, 2)]);
    /// assert!(g.is_acyclic());
    ///
    /// g.add_edge(2, 0);
    /// assert!(g.is_cyclic());
    /// ```
    fn is_cyclic(&self) -> bool {
        three_color_search(self, |_| {}).is_err()
    }

    /// Returns *true* if the graph contains no directed cycle
    fn is_acyclic(&self) -> bool {
        !self.is_cyclic()
    }
}

impl<G> TopologicalSort for G where G: ArcList + DirectedAdjacencyList {}

struct SearchFrame {
    node: Node,
    next: usize,
}

/// Depth-first search from every unfinished node in increasing order.
/// `on_finish` is called in post-order. A back arc aborts the search and the cycle it closes
/// is returned as error.
fn three_color_search<G: ArcList>(
    graph: &G,
    mut on_finish: impl FnMut(Node),
) -> Result<(), Vec<Node>> {
    let mut in_progress = graph.vertex_bitset_unset();
    let mut finished = graph.vertex_bitset_unset();
    let mut stack: Vec<SearchFrame> = Vec::new();

    for root in graph.vertices() {
        if finished.get_bit(root) {
            continue;
        }

        in_progress.set_bit(root);
        stack.push(SearchFrame { node: root, next: 0 });

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;
            let arcs = graph.arcs_of(u);

            if frame.next == arcs.len() {
                stack.pop();
                in_progress.clear_bit(u);
                finished.set_bit(u);
                on_finish(u);
                continue;
            }

            let v = arcs[frame.next].target();
            frame.next += 1;

            if in_progress.get_bit(v) {
                return Err(stack
                    .iter()
                    .map(|f| f.node)
                    .skip_while(|&w| w != v)
                    .collect());
            }

            if finished.get_bit(v) {
                continue;
            }

            in_progress.set_bit(v);
            stack.push(SearchFrame { node: v, next: 0 });
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::arb_edge_list;
    use proptest::prelude::*;

    fn dag() -> AdjArray {
        AdjArray::from_edges(7, [(2, 0), (1, 0), (0, 3), (0, 4), (0, 5), (3, 6)])
    }

    fn assert_topological(g: &AdjArray, order: &[Node]) {
        assert_eq!(order.iter().copied().sorted().collect_vec(), g.vertices().collect_vec());

        let mut position = vec![0; g.len()];
        for (i, &u) in order.iter().enumerate() {
            position[u as usize] = i;
        }
        for Edge(u, v) in g.edges(false) {
            assert!(position[u as usize] < position[v as usize]);
        }
    }

    #[test]
    fn dfs_order() {
        let g = dag();
        let order = g.topological_order().unwrap();
        assert_eq!(order, vec![2, 1, 0, 5, 4, 3, 6]);
        assert_topological(&g, &order);
        assert!(g.is_acyclic());
    }

    #[test]
    fn kahn_order() {
        let g = dag();
        let order = g.topological_kahn(&g.transpose()).unwrap();
        assert_eq!(order, vec![2, 1, 0, 5, 4, 3, 6]);
        assert_topological(&g, &order);
    }

    #[test]
    fn cycles() {
        let mut g = dag();
        g.add_edge(6, 2);
        assert!(g.is_cyclic());
        assert_eq!(g.topological_order().unwrap_err().cycle, vec![0, 3, 6, 2]);
        assert_eq!(
            g.topological_kahn(&g.transpose()).unwrap_err().cycle,
            vec![0, 2, 3, 6]
        );

        let g = AdjArray::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        assert_eq!(g.topological_order().unwrap_err().cycle, vec![0, 1, 2]);
    }

    #[test]
    fn loops() {
        let g = AdjArray::from_edges(2, [(0, 1), (1, 1)]);
        assert!(g.is_cyclic());
        assert_eq!(g.topological_order().unwrap_err().cycle, vec![1]);
        assert_eq!(g.topological_kahn(&g.transpose()).unwrap_err().cycle, vec![1]);
    }

    #[test]
    fn empty_and_isolated() {
        let g = AdjArray::new(0);
        assert_eq!(g.topological_order().unwrap(), Vec::<Node>::new());
        assert_eq!(g.topological_kahn(&g.transpose()).unwrap(), Vec::<Node>::new());
        assert!(g.is_acyclic());

        let g = AdjArray::new(3);
        assert_eq!(g.topological_order().unwrap(), vec![2, 1, 0]);
        assert_eq!(g.topological_kahn(&g.transpose()).unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn idempotent() {
        let mut g = dag();
        g.add_edge(5, 1);
        assert_eq!(g.topological_order(), g.topological_order());
        assert_eq!(
            g.topological_kahn(&g.transpose()),
            g.topological_kahn(&g.transpose())
        );
    }

    proptest! {
        #[test]
        fn orders_or_cycles((n, edges) in arb_edge_list(12, 25)) {
            for forward_only in [false, true] {
                let edges = edges
                    .iter()
                    .filter(|(u, v)| !forward_only || u < v)
                    .copied()
                    .collect_vec();
                let g = AdjArray::from_edges(n, edges);
                let kahn = g.topological_kahn(&g.transpose());

                match g.topological_order() {
                    Ok(order) => {
                        prop_assert!(g.is_acyclic());
                        assert_topological(&g, &order);
                        let kahn = kahn.unwrap();
                        assert_topological(&g, &kahn);
                    }
                    Err(NotAcyclic { cycle }) => {
                        prop_assert!(!forward_only);
                        prop_assert!(g.is_cyclic());
                        prop_assert!(!cycle.is_empty());
                        for (&u, &v) in cycle.iter().circular_tuple_windows() {
                            prop_assert!(g.has_edge(u, v));
                        }
                        prop_assert!(!kahn.unwrap_err().cycle.is_empty());
                    }
                }
            }
        }
    }
}
