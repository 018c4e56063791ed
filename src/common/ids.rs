use std::sync::atomic::{AtomicU64, Ordering};

use crate::common::CommentId;

/// Produces fresh ids for new comments and replies.
pub trait IdSupplier: Send + Sync {
    fn next_id(&self) -> CommentId;
}

/// Random UUID v4 ids, the default supplier
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSupplier;

impl IdSupplier for UuidSupplier {
    fn next_id(&self) -> CommentId {
        uuid::Uuid::new_v4().to_string()
    }
}

/// `{prefix}-1`, `{prefix}-2`, ... in call order
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdSupplier for SequentialIds {
    fn next_id(&self) -> CommentId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
