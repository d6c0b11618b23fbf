use crate::handle::{Edge, Handle, NodeId};

/// Encapsulates adding handles and edges to a handlegraph.
pub trait AdditiveHandleGraph {
    /// Add a node with the provided sequence to the graph, letting
    /// the graph pick the node ID.
    fn append_handle(&mut self, sequence: &[u8]) -> Handle;

    /// Add a node with the provided sequence and ID to the graph. If
    /// the node already exists its sequence is replaced; its edges
    /// are kept.
    fn create_handle<T: Into<NodeId>>(
        &mut self,
        sequence: &[u8],
        node_id: T,
    ) -> Handle;

    /// Insert an edge into the graph. Inserting an edge that already
    /// exists does nothing. The endpoints are not checked.
    fn create_edge(&mut self, edge: Edge);
}

/// Encapsulates removing handles and edges from a handlegraph.
pub trait SubtractiveHandleGraph {
    /// Remove a node from the graph, along with every edge on either
    /// orientation of it, returning `true` if the node existed.
    ///
    /// Paths that step on the node are not modified.
    fn remove_handle(&mut self, handle: Handle) -> bool;

    /// Remove an edge from the graph, returning `true` if the edge
    /// existed.
    fn remove_edge(&mut self, edge: Edge) -> bool;

    /// Remove every edge from the graph and return them, sorted.
    fn take_edges(&mut self) -> Vec<Edge>;
}
