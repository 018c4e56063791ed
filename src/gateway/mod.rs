pub mod section;

use std::sync::Arc;

use async_trait::async_trait;

use crate::common::{Comment, CommentAction, DeleteAction, EditAction, ReplyAction, SubmitAction};
use crate::store::GatewayResult;

pub use section::{CommentSection, Dispatched};

/// Host hooks notified after the section changes.
///
/// Every hook defaults to doing nothing, so an implementation only overrides
/// what it persists. Hooks run after the local change is committed; an error
/// is reported back to the caller and logged, never rolled back.
#[async_trait]
pub trait ActionGateway: Send + Sync {
    async fn on_submit(&self, _action: &SubmitAction) -> GatewayResult<()> {
        Ok(())
    }

    async fn on_edit(&self, _action: &EditAction) -> GatewayResult<()> {
        Ok(())
    }

    async fn on_reply(&self, _action: &ReplyAction) -> GatewayResult<()> {
        Ok(())
    }

    async fn on_delete(&self, _action: &DeleteAction) -> GatewayResult<()> {
        Ok(())
    }

    /// Receives the full comment list whenever it changes, and once at mount
    async fn on_data_change(&self, _snapshot: Arc<Vec<Comment>>) -> GatewayResult<()> {
        Ok(())
    }

    /// Route an action to its hook
    async fn dispatch(&self, action: &CommentAction) -> GatewayResult<()> {
        match action {
            CommentAction::Submitted(a) => self.on_submit(a).await,
            CommentAction::Edited(a) => self.on_edit(a).await,
            CommentAction::Replied(a) => self.on_reply(a).await,
            CommentAction::Deleted(a) => self.on_delete(a).await,
        }
    }
}

/// Gateway for hosts that persist nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGateway;

#[async_trait]
impl ActionGateway for NoopGateway {}
