use thiserror::Error;

/// Errors raised while building or querying a [`Graph`](crate::Graph).
///
/// `DuplicateNode` and `DuplicateEdge` are recoverable: the graph is left
/// unchanged and the caller may keep building.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("node {name} already exists")]
    DuplicateNode { name: String },

    #[error("duplicate edge between {from} and {to} with cost {cost}")]
    DuplicateEdge { from: String, to: String, cost: f64 },

    #[error("node not found: {name}")]
    NodeNotFound { name: String },

    #[error("invalid cost {cost} for edge between {from} and {to} (must be finite and non-negative)")]
    InvalidCost { from: String, to: String, cost: f64 },
}

impl GraphError {
    pub(crate) fn not_found(name: &str) -> Self {
        GraphError::NodeNotFound {
            name: name.to_string(),
        }
    }

    /// True for conditions the build phase reports and then skips.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GraphError::DuplicateNode { .. } | GraphError::DuplicateEdge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
