/*!
# Bipartite Graph Algorithms

Two-coloring of undirected graphs.

- [`BipartiteTest::two_color_component`] colors the connected component of a given node and
  returns either both color classes or an odd cycle witnessing that no coloring exists.
- [`BipartiteTest::compute_bipartition`] and [`BipartiteTest::is_bipartite`] do the same for
  every component of the graph.
*/

use log::debug;

use super::*;

/// Result of two-coloring a single connected component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentColoring {
    /// The component is bipartite. `left` contains the representative the coloring started from.
    Bipartite { left: NodeBitSet, right: NodeBitSet },

    /// The component is not bipartite. The nodes form an odd cycle in the order they are
    /// connected; the last node is adjacent to the first one. A loop `{u, u}` is reported as `[u]`.
    OddCycle(Vec<Node>),
}

impl ComponentColoring {
    /// Returns *true* if the component is bipartite
    pub fn is_bipartite(&self) -> bool {
        matches!(self, Self::Bipartite { .. })
    }

    /// Returns the odd cycle if the component is not bipartite
    pub fn odd_cycle(&self) -> Option<&[Node]> {
        match self {
            Self::OddCycle(cycle) => Some(cycle),
            Self::Bipartite { .. } => None,
        }
    }
}

/// A trait for testing and computing bipartitions of undirected graphs.
pub trait BipartiteTest: ArcList + GraphType<Dir = Undirected> {
    /// Two-colors the connected component containing `rep` by depth-first search.
    /// Other components are not inspected.
    ///
    /// If a neighbor carries the same color as the current node, the search stops and
    /// the odd cycle closed by this arc is reported.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjArrayUndir::from_edges(5, [(0, 3), (1, 3), (2, 3), (2, 4)]);
    /// assert!(g.two_color_component(0).is_bipartite());
    ///
    /// g.add_edge(3, 4);
    /// assert_eq!(g.two_color_component(0).odd_cycle(), Some([3, 4, 2].as_slice()));
    /// ```
    fn two_color_component(&self, rep: Node) -> ComponentColoring {
        let mut colors = [self.vertex_bitset_unset(), self.vertex_bitset_unset()];
        match two_color_from(self, rep, &mut colors) {
            Ok(()) => {
                let [left, right] = colors;
                ComponentColoring::Bipartite { left, right }
            }
            Err(cycle) => ComponentColoring::OddCycle(cycle),
        }
    }

    /// Tests whether every edge connects a node inside `right` with a node outside of it.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    /// assert!(g.is_bipartition(&NodeBitSet::new_with_bits_set(4, [1 as Node, 3])));
    /// assert!(!g.is_bipartition(&NodeBitSet::new_with_bits_set(4, [1 as Node, 2])));
    /// ```
    fn is_bipartition(&self, right: &NodeBitSet) -> bool {
        self.edges(true)
            .all(|Edge(u, v)| right.get_bit(u) != right.get_bit(v))
    }

    /// Computes a bipartition of the whole graph and returns the nodes of one side.
    /// In every component, the smallest node is placed on the other side.
    /// Returns `None` if some component contains an odd cycle.
    fn compute_bipartition(&self) -> Option<NodeBitSet> {
        let mut colors = [self.vertex_bitset_unset(), self.vertex_bitset_unset()];
        for u in self.vertices() {
            if colors[0].get_bit(u) || colors[1].get_bit(u) {
                continue;
            }
            if two_color_from(self, u, &mut colors).is_err() {
                return None;
            }
        }

        let [_, right] = colors;
        Some(right)
    }

    /// Tests whether the whole graph is bipartite.
    ///
    /// # Examples
    /// ```
    /// use adjgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = AdjArrayUndir::from_edges(6, [(0, 1), (1, 2), (3, 4)]);
    /// assert!(g.is_bipartite());
    ///
    /// g.add_edges([(3, 5), (4, 5)]);
    /// assert!(!g.is_bipartite());
    /// ```
    fn is_bipartite(&self) -> bool {
        self.compute_bipartition().is_some()
    }
}

impl<G> BipartiteTest for G where G: ArcList + GraphType<Dir = Undirected> {}

struct ColorFrame {
    node: Node,
    side: usize,
    next: usize,
}

/// Colors all uncolored nodes reachable from `rep`, starting with `colors[0]`.
/// On conflict, the odd cycle is returned as error.
fn two_color_from<G: ArcList>(
    graph: &G,
    rep: Node,
    colors: &mut [NodeBitSet; 2],
) -> Result<(), Vec<Node>> {
    colors[0].set_bit(rep);
    let mut stack = vec![ColorFrame {
        node: rep,
        side: 0,
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let u = frame.node;
        let side = frame.side;
        let arcs = graph.arcs_of(u);

        if frame.next == arcs.len() {
            stack.pop();
            continue;
        }

        let v = arcs[frame.next].target();
        frame.next += 1;

        if colors[side].get_bit(v) {
            let cycle = if u == v {
                vec![u]
            } else {
                let mut cycle = vec![v, u];
                cycle.extend(
                    stack[..stack.len() - 1]
                        .iter()
                        .rev()
                        .map(|f| f.node)
                        .take_while(|&w| w != v),
                );
                cycle
            };

            debug!("Found odd cycle of length {} at node {u}", cycle.len());
            return Err(cycle);
        }

        if colors[1 - side].set_bit(v) {
            continue;
        }

        stack.push(ColorFrame {
            node: v,
            side: 1 - side,
            next: 0,
        });
    }

    Ok(())
}
