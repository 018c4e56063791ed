use thiserror::Error;

use crate::common::CommentId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Comment not found: {id}")]
    NotFound { id: CommentId },

    #[error("Parent comment not found: {parent_id}")]
    ParentNotFound { parent_id: CommentId },

    #[error("No signed-in user")]
    Unauthenticated,

    #[error("Comment id already in use: {id}")]
    DuplicateId { id: CommentId },
}

/// A host hook failed. Local state is already committed when this is raised.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{hook} hook rejected: {message}")]
    Rejected { hook: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper functions for creating common errors
impl StoreError {
    pub fn not_found(id: impl AsRef<str>) -> Self {
        StoreError::NotFound {
            id: id.as_ref().to_string(),
        }
    }

    pub fn parent_not_found(parent_id: impl AsRef<str>) -> Self {
        StoreError::ParentNotFound {
            parent_id: parent_id.as_ref().to_string(),
        }
    }

    pub fn duplicate_id(id: impl AsRef<str>) -> Self {
        StoreError::DuplicateId {
            id: id.as_ref().to_string(),
        }
    }
}

impl GatewayError {
    pub fn rejected(hook: impl AsRef<str>, message: impl AsRef<str>) -> Self {
        GatewayError::Rejected {
            hook: hook.as_ref().to_string(),
            message: message.as_ref().to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type GatewayResult<T> = Result<T, GatewayError>;
