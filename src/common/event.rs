use serde::{Deserialize, Serialize};

use crate::common::{CommentId, CurrentUser};

/// Payload handed to the host after a new top-level comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAction {
    pub user_id: String,
    pub com_id: CommentId,
    pub avatar_url: String,
    pub user_profile: Option<String>,
    pub full_name: String,
    pub text: String,
    pub replies: Vec<CommentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAction {
    pub user_id: String,
    pub com_id: CommentId,
    pub avatar_url: String,
    pub user_profile: Option<String>,
    pub full_name: String,
    pub text: String,
    pub parent_of_edited_comment_id: Option<CommentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyAction {
    pub user_id: String,
    pub replied_to_comment_id: CommentId,
    pub avatar_url: String,
    pub user_profile: Option<String>,
    pub full_name: String,
    pub text: String,
    pub parent_of_replied_comment_id: Option<CommentId>,
    pub com_id: CommentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAction {
    pub com_id_to_delete: CommentId,
    pub parent_of_delete_id: Option<CommentId>,
}

/// Every mutation the section reports to its host, in one closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CommentAction {
    Submitted(SubmitAction),
    Edited(EditAction),
    Replied(ReplyAction),
    Deleted(DeleteAction),
}

impl CommentAction {
    pub fn submitted(author: &CurrentUser, com_id: CommentId, text: String) -> Self {
        CommentAction::Submitted(SubmitAction {
            user_id: author.id.clone(),
            com_id,
            avatar_url: author.img.clone(),
            user_profile: author.profile.clone(),
            full_name: author.full_name.clone(),
            text,
            replies: Vec::new(),
        })
    }

    pub fn edited(
        author: &CurrentUser,
        com_id: CommentId,
        parent_id: Option<CommentId>,
        text: String,
    ) -> Self {
        CommentAction::Edited(EditAction {
            user_id: author.id.clone(),
            com_id,
            avatar_url: author.img.clone(),
            user_profile: author.profile.clone(),
            full_name: author.full_name.clone(),
            text,
            parent_of_edited_comment_id: parent_id,
        })
    }

    pub fn replied(
        author: &CurrentUser,
        replied_to: CommentId,
        parent_id: Option<CommentId>,
        com_id: CommentId,
        text: String,
    ) -> Self {
        CommentAction::Replied(ReplyAction {
            user_id: author.id.clone(),
            replied_to_comment_id: replied_to,
            avatar_url: author.img.clone(),
            user_profile: author.profile.clone(),
            full_name: author.full_name.clone(),
            text,
            parent_of_replied_comment_id: parent_id,
            com_id,
        })
    }

    pub fn deleted(com_id: CommentId, parent_id: Option<CommentId>) -> Self {
        CommentAction::Deleted(DeleteAction {
            com_id_to_delete: com_id,
            parent_of_delete_id: parent_id,
        })
    }

    /// Id of the entry the action produced or touched
    pub fn com_id(&self) -> &str {
        match self {
            CommentAction::Submitted(a) => &a.com_id,
            CommentAction::Edited(a) => &a.com_id,
            CommentAction::Replied(a) => &a.com_id,
            CommentAction::Deleted(a) => &a.com_id_to_delete,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommentAction::Submitted(_) => "submit",
            CommentAction::Edited(_) => "edit",
            CommentAction::Replied(_) => "reply",
            CommentAction::Deleted(_) => "delete",
        }
    }
}
