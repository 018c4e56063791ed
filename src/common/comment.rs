use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::CurrentUser;

pub type CommentId = String;

/// A top-level entry of the thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Comment {
    pub user_id: String,
    pub com_id: CommentId,
    pub full_name: String,
    pub avatar_url: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// An entry attached to a top-level comment. Replies do not take replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Reply {
    pub user_id: String,
    pub com_id: CommentId,
    pub full_name: String,
    pub avatar_url: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(com_id: CommentId, text: String, author: &CurrentUser, at: DateTime<Utc>) -> Self {
        Self {
            user_id: author.id.clone(),
            com_id,
            full_name: author.full_name.clone(),
            avatar_url: author.img.clone(),
            text,
            user_profile: author.profile.clone(),
            timestamp: Some(at),
            replies: Vec::new(),
        }
    }

    pub fn reply(&self, reply_id: &str) -> Option<&Reply> {
        self.replies.iter().find(|r| r.com_id == reply_id)
    }

    /// Ids of this comment and every reply under it
    pub fn ids(&self) -> impl Iterator<Item = &CommentId> {
        std::iter::once(&self.com_id).chain(self.replies.iter().map(|r| &r.com_id))
    }
}

impl Reply {
    pub fn new(com_id: CommentId, text: String, author: &CurrentUser, at: DateTime<Utc>) -> Self {
        Self {
            user_id: author.id.clone(),
            com_id,
            full_name: author.full_name.clone(),
            avatar_url: author.img.clone(),
            text,
            user_profile: author.profile.clone(),
            timestamp: Some(at),
        }
    }
}

/// Borrowed view over either kind of entry, for code that only reads the
/// shared fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    Comment(&'a Comment),
    Reply(&'a Reply),
}

impl<'a> Entry<'a> {
    pub fn com_id(&self) -> &'a str {
        match self {
            Entry::Comment(c) => &c.com_id,
            Entry::Reply(r) => &r.com_id,
        }
    }

    pub fn user_id(&self) -> &'a str {
        match self {
            Entry::Comment(c) => &c.user_id,
            Entry::Reply(r) => &r.user_id,
        }
    }

    pub fn full_name(&self) -> &'a str {
        match self {
            Entry::Comment(c) => &c.full_name,
            Entry::Reply(r) => &r.full_name,
        }
    }

    pub fn avatar_url(&self) -> &'a str {
        match self {
            Entry::Comment(c) => &c.avatar_url,
            Entry::Reply(r) => &r.avatar_url,
        }
    }

    pub fn user_profile(&self) -> Option<&'a str> {
        match self {
            Entry::Comment(c) => c.user_profile.as_deref(),
            Entry::Reply(r) => r.user_profile.as_deref(),
        }
    }

    pub fn text(&self) -> &'a str {
        match self {
            Entry::Comment(c) => &c.text,
            Entry::Reply(r) => &r.text,
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Entry::Comment(c) => c.timestamp,
            Entry::Reply(r) => r.timestamp,
        }
    }
}
