use std::fmt;

use crate::common::CommentId;

/// Which entry an edit, reply or delete is aimed at.
///
/// Replies are addressed through their parent, so one level of nesting is
/// the only shape a target can describe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Comment(CommentId),
    Reply {
        parent_id: CommentId,
        reply_id: CommentId,
    },
}

impl Target {
    pub fn comment(id: impl Into<CommentId>) -> Self {
        Target::Comment(id.into())
    }

    pub fn reply(parent_id: impl Into<CommentId>, reply_id: impl Into<CommentId>) -> Self {
        Target::Reply {
            parent_id: parent_id.into(),
            reply_id: reply_id.into(),
        }
    }

    /// Build a target from an id and an optional parent, the way hosts
    /// usually carry it around.
    pub fn from_parts(id: impl Into<CommentId>, parent_id: Option<CommentId>) -> Self {
        match parent_id {
            Some(parent_id) => Target::reply(parent_id, id),
            None => Target::comment(id),
        }
    }

    /// Id of the targeted entry itself
    pub fn id(&self) -> &CommentId {
        match self {
            Target::Comment(id) => id,
            Target::Reply { reply_id, .. } => reply_id,
        }
    }

    pub fn parent_id(&self) -> Option<&CommentId> {
        match self {
            Target::Comment(_) => None,
            Target::Reply { parent_id, .. } => Some(parent_id),
        }
    }

    /// Top-level comment that owns the targeted entry
    pub fn thread_id(&self) -> &CommentId {
        match self {
            Target::Comment(id) => id,
            Target::Reply { parent_id, .. } => parent_id,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Comment(id) => write!(f, "{}", id),
            Target::Reply {
                parent_id,
                reply_id,
            } => write!(f, "{}/{}", parent_id, reply_id),
        }
    }
}
