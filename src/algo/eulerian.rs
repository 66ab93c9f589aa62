/*!
# Eulerian Cycles and Paths

Hierholzer's algorithm on a private working copy of the arc lists.

Arcs are consumed from the front of each list. In undirected graphs, consuming the arc `u -> v`
also removes its reciprocal copy stored at `v` (loops are stored once and have no copy).
The walk is built in a single buffer of length `m + 1`: the low end holds the stack of
unfinished nodes, the high end collects the finished walk back to front.
*/

use log::debug;

use super::*;

pub trait Eulerian: ArcList + GraphType {
    /// Computes a closed walk that uses every arc (every edge, if undirected) exactly once.
    /// The walk starts and ends at node 0. A graph without nodes yields an empty walk.
    ///
    /// Fails with [`EulerianError::NotBalanced`] if some sub-walk gets stuck away from its
    /// start and with [`EulerianError::NotStronglyConnected`] if some node was never reached
    /// (isolated nodes included). Undirected arc lists without the reciprocal copy of some arc
    /// (see [`UndirectedGraph::from_adjacency`]) also yield [`EulerianError::NotBalanced`].
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);
    /// assert_eq!(g.eulerian_cycle(), Ok(vec![0, 1, 2, 3, 0]));
    ///
    /// let g = AdjArray::from_edges(4, [(0, 1), (0, 2), (1, 2), (2, 3), (3, 1)]);
    /// assert_eq!(g.eulerian_cycle(), Err(EulerianError::NotBalanced));
    /// ```
    fn eulerian_cycle(&self) -> Result<Vec<Node>, EulerianError> {
        Hierholzer::new(self.arc_lists(), Self::is_undirected()).cycle()
    }

    /// Like [`Eulerian::eulerian_cycle`] but consumes the graph instead of copying its arcs
    fn into_eulerian_cycle(self) -> Result<Vec<Node>, EulerianError> {
        Hierholzer::new(self.into_arc_lists(), Self::is_undirected()).cycle()
    }

    /// Computes a walk that uses every arc (every edge, if undirected) exactly once.
    ///
    /// In a directed graph, the walk starts at the first node with more outgoing than
    /// incoming arcs; in an undirected graph at the first node of odd degree. If there is
    /// no such node, it starts at node 0.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(4, [(0, 1), (1, 2), (2, 0), (2, 3)]);
    /// assert_eq!(g.eulerian_path(), Ok(vec![2, 0, 1, 2, 3]));
    /// ```
    fn eulerian_path(&self) -> Result<Vec<Node>, EulerianError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        self.eulerian_path_from(path_start(self))
    }

    /// Computes a walk starting at `start` that uses every arc (every edge, if undirected)
    /// exactly once.
    ///
    /// The first sub-walk may end anywhere; every later sub-walk has to return to the node
    /// it started from, otherwise [`EulerianError::NotBalanced`] is returned.
    /// ** Panics if `start >= n` on a non-empty graph **
    fn eulerian_path_from(&self, start: Node) -> Result<Vec<Node>, EulerianError> {
        Hierholzer::new(self.arc_lists(), Self::is_undirected()).path(start)
    }
}

impl<G> Eulerian for G where G: ArcList + GraphType {}

/// First node with surplus out-degree (directed) or odd degree (undirected), else 0
fn path_start<G: ArcList + GraphType>(graph: &G) -> Node {
    if G::is_undirected() {
        graph
            .vertices()
            .find(|&u| {
                let loops = graph.neighbors_of(u).filter(|&v| v == u).count();
                (graph.degree_of(u) as usize + loops) % 2 == 1
            })
            .unwrap_or(0)
    } else {
        let mut in_degrees = vec![0 as NumNodes; graph.len()];
        for v in graph.vertices().flat_map(|u| graph.neighbors_of(u)) {
            in_degrees[v as usize] += 1;
        }

        graph
            .vertices()
            .find(|&u| graph.degree_of(u) > in_degrees[u as usize])
            .unwrap_or(0)
    }
}

struct Hierholzer<A: ArcTarget> {
    arcs: Vec<Vec<A>>,
    next_arc: Vec<usize>,
    undirected: bool,
    unvisited: NodeBitSet,
    walk: Vec<Node>,
    stack_len: usize,
    finished: usize,
}

impl<A: ArcTarget> Hierholzer<A> {
    fn new(arcs: Vec<Vec<A>>, undirected: bool) -> Self {
        let n = arcs.len();
        let num_arcs: usize = arcs.iter().map(|a| a.len()).sum();

        let m = if undirected {
            let loops = arcs
                .iter()
                .enumerate()
                .flat_map(|(u, a)| a.iter().filter(move |x| x.target() as usize == u))
                .count();
            (num_arcs + loops) / 2
        } else {
            num_arcs
        };

        Self {
            arcs,
            next_arc: vec![0; n],
            undirected,
            unvisited: NodeBitSet::new_all_set(n as NumNodes),
            walk: vec![0; m + 1],
            stack_len: 0,
            finished: m + 1,
        }
    }

    fn top(&self) -> Node {
        self.walk[self.stack_len - 1]
    }

    fn cycle(mut self) -> Result<Vec<Node>, EulerianError> {
        if self.arcs.is_empty() {
            return Ok(Vec::new());
        }

        self.walk[0] = 0;
        self.stack_len = 1;

        while self.stack_len > 0 {
            let v = self.top();
            self.follow()?;
            if self.top() != v {
                debug!("Eulerian cycle: walk from {v} got stuck at {}", self.top());
                return Err(EulerianError::NotBalanced);
            }
            self.keep();
        }

        self.into_walk()
    }

    fn path(mut self, start: Node) -> Result<Vec<Node>, EulerianError> {
        if self.arcs.is_empty() {
            return Ok(Vec::new());
        }

        self.walk[0] = start;
        self.stack_len = 1;
        self.follow()?;
        self.keep();

        while self.stack_len > 0 {
            let v = self.top();
            self.follow()?;
            if self.top() != v {
                debug!("Eulerian path: sub-walk from {v} got stuck at {}", self.top());
                return Err(EulerianError::NotBalanced);
            }
            self.keep();
        }

        self.into_walk()
    }

    fn into_walk(self) -> Result<Vec<Node>, EulerianError> {
        if self.unvisited.cardinality() > 0 {
            debug!(
                "Eulerian walk missed {} nodes",
                self.unvisited.cardinality()
            );
            return Err(EulerianError::NotStronglyConnected);
        }

        debug_assert_eq!(self.finished, 0);
        Ok(self.walk)
    }

    /// Follows arcs from the top of the stack until stuck, pushing every reached node.
    /// Fails if an undirected arc has no reciprocal copy left.
    fn follow(&mut self) -> Result<(), EulerianError> {
        let mut u = self.top();
        loop {
            self.unvisited.clear_bit(u);

            let ui = u as usize;
            let Some(&arc) = self.arcs[ui].get(self.next_arc[ui]) else {
                return Ok(());
            };
            self.next_arc[ui] += 1;

            let w = arc.target();
            if self.undirected && w != u {
                let wi = w as usize;
                let remaining = &mut self.arcs[wi];
                let Some(x) = (self.next_arc[wi]..remaining.len())
                    .find(|&x| arc.is_reverse_of(&remaining[x], u))
                else {
                    debug!("Eulerian walk: arc {u} -> {w} has no reciprocal copy");
                    return Err(EulerianError::NotBalanced);
                };
                remaining.swap_remove(x);
            }

            self.walk[self.stack_len] = w;
            self.stack_len += 1;

            u = w;
        }
    }

    /// Moves nodes without remaining arcs from the top of the stack to the finished walk
    fn keep(&mut self) {
        while self.stack_len > 0 {
            let u = self.top() as usize;
            if self.next_arc[u] < self.arcs[u].len() {
                break;
            }

            self.finished -= 1;
            self.walk[self.finished] = u as Node;
            self.stack_len -= 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn assert_uses_every_arc<G: AdjacencyList + GraphType>(g: &G, walk: &[Node]) {
        let normalize = |e: Edge| if G::is_undirected() { e.normalized() } else { e };

        let used = walk
            .iter()
            .tuple_windows()
            .map(|(&u, &v)| normalize(Edge(u, v)))
            .sorted()
            .collect_vec();
        let expected = g
            .edges(G::is_undirected())
            .map(normalize)
            .sorted()
            .collect_vec();
        assert_eq!(used, expected);
    }

    #[test]
    fn directed_cycle() {
        let g = AdjArray::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(g.eulerian_cycle(), Ok(vec![0, 1, 2, 3, 0]));
        assert_eq!(g.into_eulerian_cycle(), Ok(vec![0, 1, 2, 3, 0]));
    }

    #[test]
    fn directed_splice() {
        let g = AdjArray::from_edges(5, [(0, 1), (1, 2), (2, 0), (1, 3), (3, 4), (4, 1)]);
        let walk = g.eulerian_cycle().unwrap();
        assert_eq!(walk, vec![0, 1, 3, 4, 1, 2, 0]);
        assert_uses_every_arc(&g, &walk);
    }

    #[test]
    fn directed_failures() {
        let g = AdjArray::from_edges(4, [(0, 1), (0, 2), (1, 2), (2, 3), (3, 1)]);
        assert_eq!(g.eulerian_cycle(), Err(EulerianError::NotBalanced));

        let g = AdjArray::from_edges(4, [(0, 1), (1, 0), (2, 3), (3, 2)]);
        assert_eq!(g.eulerian_cycle(), Err(EulerianError::NotStronglyConnected));

        let g = AdjArray::from_edges(3, [(0, 1), (1, 0)]);
        assert_eq!(g.eulerian_cycle(), Err(EulerianError::NotStronglyConnected));
    }

    #[test]
    fn undirected_missing_reciprocal() {
        let g = AdjArrayUndir::from_adjacency(vec![vec![1], vec![]]);
        assert_eq!(g.eulerian_cycle(), Err(EulerianError::NotBalanced));
        assert_eq!(g.eulerian_path(), Err(EulerianError::NotBalanced));

        let g = LabeledAdjArrayUndir::from_adjacency(vec![
            vec![Half::new(1, 0), Half::new(1, 1)],
            vec![Half::new(0, 0), Half::new(0, 2)],
        ]);
        assert_eq!(g.eulerian_cycle(), Err(EulerianError::NotBalanced));
    }

    #[test]
    fn empty() {
        assert_eq!(AdjArray::new(0).eulerian_cycle(), Ok(vec![]));
        assert_eq!(AdjArray::new(0).eulerian_path(), Ok(vec![]));
        assert_eq!(AdjArrayUndir::new(0).eulerian_cycle(), Ok(vec![]));
        assert_eq!(AdjArray::new(1).eulerian_cycle(), Ok(vec![0]));
    }

    #[test]
    fn directed_path() {
        let g = AdjArray::from_edges(4, [(0, 1), (1, 2), (2, 0), (2, 3)]);
        assert_eq!(g.eulerian_path(), Ok(vec![2, 0, 1, 2, 3]));
        assert_eq!(g.eulerian_path_from(0), Err(EulerianError::NotBalanced));

        let g = AdjArray::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        assert_eq!(g.eulerian_path(), Ok(vec![0, 1, 2, 0]));
        assert_eq!(g.eulerian_path_from(1), Ok(vec![1, 2, 0, 1]));
    }

    #[test]
    fn undirected_cycle() {
        let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        assert_eq!(g.eulerian_cycle(), Ok(vec![0, 1, 2, 0]));

        let g = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]);
        let walk = g.eulerian_cycle().unwrap();
        assert_eq!(walk.first(), Some(&0));
        assert_eq!(walk.last(), Some(&0));
        assert_uses_every_arc(&g, &walk);

        let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
        assert_eq!(g.eulerian_cycle(), Err(EulerianError::NotBalanced));
    }

    #[test]
    fn undirected_loops_and_parallel_edges() {
        let g = AdjArrayUndir::from_edges(2, [(0, 1), (1, 1), (1, 0)]);
        assert_eq!(g.eulerian_cycle(), Ok(vec![0, 1, 1, 0]));
    }

    #[test]
    fn undirected_path() {
        let g = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 1)]);
        assert_eq!(g.eulerian_path(), Ok(vec![0, 1, 3, 2, 1]));
    }

    #[test]
    fn labeled_parallel_edges() {
        let mut g = LabeledAdjArrayUndir::new(2);
        g.add_labeled_edge(0, 1, 7);
        g.add_labeled_edge(0, 1, 8);
        assert_eq!(g.eulerian_cycle(), Ok(vec![0, 1, 0]));
    }

    proptest! {
        #[test]
        fn closed_walks_are_found(
            (n, extra) in (1..8 as NumNodes).prop_flat_map(|n| (Just(n), proptest::collection::vec(0..n, 0..15)))
        ) {
            let closed_walk = (0..n).chain(extra).chain(std::iter::once(0)).collect_vec();
            let edges = closed_walk.iter().copied().tuple_windows::<(_, _)>().collect_vec();

            let g = AdjArray::from_edges(n, edges.iter());
            let walk = g.eulerian_cycle().unwrap();
            prop_assert_eq!(walk.len(), edges.len() + 1);
            prop_assert_eq!(walk.first(), walk.last());
            assert_uses_every_arc(&g, &walk);

            let g = AdjArrayUndir::from_edges(n, edges.iter());
            let walk = g.eulerian_cycle().unwrap();
            prop_assert_eq!(walk.len(), edges.len() + 1);
            prop_assert_eq!(walk.first(), walk.last());
            assert_uses_every_arc(&g, &walk);

            let open_walk = &closed_walk[..closed_walk.len() - 1];
            let g = AdjArray::from_edges(n, open_walk.iter().copied().tuple_windows::<(_, _)>());
            let walk = g.eulerian_path().unwrap();
            prop_assert_eq!(walk.len(), open_walk.len());
            assert_uses_every_arc(&g, &walk);
        }
    }
}
