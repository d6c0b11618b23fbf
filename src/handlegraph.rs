/*!
Traits for immutable access to the nodes and edges of a graph.

[`HandleGraph`] covers the queries that return plain values, while
the `Into*` traits are implemented on references to a graph and
return iterators borrowing from it.
*/

use crate::handle::{Direction, Edge, Handle, NodeId};

pub mod iter;

pub use self::iter::*;

/// Trait encapsulating the immutable aspects of a handlegraph
pub trait HandleGraph {
    fn has_node<I: Into<NodeId>>(&self, node_id: I) -> bool;

    /// The length of the sequence of a given node
    fn length(&self, handle: Handle) -> usize;

    /// Returns the sequence of a node in the handle's local forward
    /// orientation, i.e. the reverse complement of the stored
    /// sequence if the handle is reverse.
    fn sequence(&self, handle: Handle) -> Vec<u8>;

    /// At most `size` bases of the oriented sequence, starting at
    /// `index`.
    fn subsequence(
        &self,
        handle: Handle,
        index: usize,
        size: usize,
    ) -> Vec<u8> {
        let seq = self.sequence(handle);
        let end = index.saturating_add(size).min(seq.len());
        seq.get(index..end).map(<[u8]>::to_vec).unwrap_or_default()
    }

    fn min_node_id(&self) -> NodeId;
    fn max_node_id(&self) -> NodeId;

    /// Return the total number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Return the total number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Sum up all the sequences in the graph
    fn total_length(&self) -> usize;

    fn degree(&self, handle: Handle, dir: Direction) -> usize;

    fn has_edge(&self, left: Handle, right: Handle) -> bool;
}

/// Access to all the handles in a graph, one forward handle per node.
pub trait IntoHandles: Sized {
    type Handles: Iterator<Item = Handle>;

    fn handles(self) -> Self::Handles;

    /// All node IDs in ascending order.
    fn sorted_node_ids(self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.handles().map(|h| h.id()).collect();
        ids.sort_unstable();
        ids
    }
}

/// Access to the neighbors of a handle.
pub trait IntoNeighbors: Sized {
    type Neighbors: Iterator<Item = Handle>;

    fn neighbors(self, handle: Handle, dir: Direction) -> Self::Neighbors;
}

/// Access to every directed edge in the graph.
pub trait IntoEdges: Sized {
    type Edges: Iterator<Item = Edge>;

    fn edges(self) -> Self::Edges;
}
