//! Error types for graph construction, chaining and incorporation.

use thiserror::Error;

use crate::handle::NodeId;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PangenomeError>;

/// Broad classification of a [`PangenomeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The graph itself violates a structural invariant.
    Structural,
    /// The caller supplied input that cannot be applied to the graph.
    MalformedInput,
    /// Reading or writing failed.
    Io,
}

#[derive(Error, Debug)]
pub enum PangenomeError {
    /// Topological sorting reached a node that was still being
    /// visited.
    #[error("graph is not a DAG: cycle closed at node {0}")]
    Cycle(NodeId),

    /// An edge or path step refers to a node that is not in the graph.
    #[error("dangling reference to node {0}")]
    DanglingReference(NodeId),

    /// A seed or edit names a node that is not in the graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("invalid edit at index {index}: {reason}")]
    InvalidEdit { index: usize, reason: String },

    #[error("unsupported GFA record type '{record}' on line {line}")]
    UnsupportedRecord { line: usize, record: String },

    #[error("malformed GFA line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("segment '{0}' is referenced but never defined")]
    UndefinedSegment(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PangenomeError {
    pub fn kind(&self) -> ErrorKind {
        use PangenomeError::*;
        match self {
            Cycle(_) | DanglingReference(_) => ErrorKind::Structural,
            Io(_) => ErrorKind::Io,
            UnknownNode(_)
            | InvalidEdit { .. }
            | UnsupportedRecord { .. }
            | MalformedLine { .. }
            | UndefinedSegment(_)
            | InvalidConfig(_) => ErrorKind::MalformedInput,
        }
    }

    #[inline]
    pub fn is_structural(&self) -> bool {
        self.kind() == ErrorKind::Structural
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        assert!(PangenomeError::Cycle(NodeId(3)).is_structural());
        assert_eq!(
            PangenomeError::UnknownNode(NodeId(3)).kind(),
            ErrorKind::MalformedInput
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(PangenomeError::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn error_messages_name_the_culprit() {
        let err = PangenomeError::Cycle(NodeId(42));
        assert_eq!(err.to_string(), "graph is not a DAG: cycle closed at node 42");

        let err = PangenomeError::UnsupportedRecord {
            line: 3,
            record: "W".into(),
        };
        assert!(err.to_string().contains("line 3"));
    }
}
