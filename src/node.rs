/*!
# Node Representation

Nodes are dense indices `0..n` of type `Node = u32`. There is no node object:
a node is identified by its position in the adjacency lists of a graph.
Visited-sets, color classes and clique candidates are all [`NodeBitSet`]s
with one bit per node.
*/

use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;
