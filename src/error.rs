use thiserror::Error;

/// Every way a graph operation can fail.
///
/// All validation happens before any mutation, so an `Err` always leaves
/// the graph exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("key not found in graph")]
    KeyNotFound,
    #[error("key already exists in graph")]
    KeyAlreadyExists,
    #[error("edge index {index} is out of range for a graph of degree {degree}")]
    EdgeOutOfRange { index: usize, degree: usize },
    #[error("nodes are already connected")]
    NodesAlreadyConnected,
    #[error("edge is already in use")]
    EdgeAlreadyInUse,
    #[error("nodes are not connected")]
    NodesAreNotConnected,
    #[error("cursor reached the end of the graph")]
    IteratorReachedEnd,
    #[error("cursor belongs to a different graph")]
    WrongGraph,
}

impl GraphError {
    /// True for the outcome a caller gets when probing an empty slot.
    pub fn is_end(&self) -> bool {
        matches!(self, GraphError::IteratorReachedEnd)
    }
}
