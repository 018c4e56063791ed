use std::sync::Arc;

use super::{ActionGateway, NoopGateway};
use crate::common::{
    Clock, Comment, CommentAction, CommentId, IdSupplier, Reply, SystemClock, UuidSupplier,
};
use crate::config::SectionConfig;
use crate::store::{CommentStore, GatewayError, StoreError, StoreResult, Target};
use crate::view::{ThreadView, comments_title};

/// Result of a committed action plus any host hook failures it produced.
#[derive(Debug)]
pub struct Dispatched<T> {
    pub value: T,
    pub failures: Vec<GatewayError>,
}

impl<T> Dispatched<T> {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A mounted comment section: one store, its options and the host hooks.
///
/// Each action first changes the store, synchronously and all-or-nothing.
/// Only when that succeeded are the action hook and then the data-change
/// hook awaited, one after the other. Hook errors are logged and returned
/// in [`Dispatched::failures`]; the local change stays.
pub struct CommentSection {
    store: CommentStore,
    config: SectionConfig,
    gateway: Box<dyn ActionGateway>,
    ids: Box<dyn IdSupplier>,
}

impl CommentSection {
    pub fn new(comments: Vec<Comment>, config: SectionConfig) -> StoreResult<Self> {
        Self::with_clock(comments, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        comments: Vec<Comment>,
        config: SectionConfig,
        clock: Arc<dyn Clock>,
    ) -> StoreResult<Self> {
        let store = CommentStore::with_clock(comments, config.current_user.clone(), clock)?;
        Ok(Self {
            store,
            config,
            gateway: Box::new(NoopGateway),
            ids: Box::new(UuidSupplier),
        })
    }

    pub fn with_gateway(mut self, gateway: impl ActionGateway + 'static) -> Self {
        self.gateway = Box::new(gateway);
        self
    }

    pub fn with_id_supplier(mut self, ids: impl IdSupplier + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Hand the initial data to the data-change hook
    pub async fn mount(&self) -> Vec<GatewayError> {
        let mut failures = Vec::new();
        self.notify_data_change(&mut failures).await;
        failures
    }

    pub fn store(&self) -> &CommentStore {
        &self.store
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    pub fn title(&self) -> String {
        comments_title(self.store.comments(), self.config.comments_count)
    }

    pub fn view(&self) -> ThreadView<'_> {
        ThreadView::new(&self.store, self.store.clock().now())
            .show_timestamp(self.config.show_timestamp)
    }

    pub fn toggle_edit(&mut self, id: &str) -> StoreResult<bool> {
        self.store.toggle_edit(id)
    }

    pub fn toggle_reply(&mut self, id: &str) -> StoreResult<bool> {
        self.store.toggle_reply(id)
    }

    /// Post a new top-level comment under a freshly supplied id
    pub async fn submit(&mut self, text: String) -> StoreResult<Dispatched<Comment>> {
        let comment = self.store.submit(text, self.ids.next_id())?;

        let action = CommentAction::submitted(
            self.author()?,
            comment.com_id.clone(),
            comment.text.clone(),
        );
        Ok(self.notify(action, comment).await)
    }

    pub async fn edit(&mut self, text: String, target: Target) -> StoreResult<Dispatched<()>> {
        self.store.edit(text.clone(), &target)?;

        let action = CommentAction::edited(
            self.author()?,
            target.id().clone(),
            target.parent_id().cloned(),
            text,
        );
        Ok(self.notify(action, ()).await)
    }

    pub async fn reply(&mut self, text: String, target: Target) -> StoreResult<Dispatched<Reply>> {
        let reply = self.store.reply(text, &target, self.ids.next_id())?;

        let action = CommentAction::replied(
            self.author()?,
            target.id().clone(),
            target.parent_id().cloned(),
            reply.com_id.clone(),
            reply.text.clone(),
        );
        Ok(self.notify(action, reply).await)
    }

    pub async fn delete(&mut self, target: Target) -> StoreResult<Dispatched<CommentId>> {
        self.store.delete(&target)?;

        let action = CommentAction::deleted(target.id().clone(), target.parent_id().cloned());
        Ok(self.notify(action, target.id().clone()).await)
    }

    // Private helper methods

    fn author(&self) -> StoreResult<&crate::common::CurrentUser> {
        self.store.current_user().ok_or(StoreError::Unauthenticated)
    }

    async fn notify<T>(&self, action: CommentAction, value: T) -> Dispatched<T> {
        let mut failures = Vec::new();

        if let Err(err) = self.gateway.dispatch(&action).await {
            log::warn!("{} hook failed for {}: {}", action.name(), action.com_id(), err);
            failures.push(err);
        }
        self.notify_data_change(&mut failures).await;

        Dispatched { value, failures }
    }

    async fn notify_data_change(&self, failures: &mut Vec<GatewayError>) {
        if let Err(err) = self.gateway.on_data_change(self.store.snapshot()).await {
            log::warn!("data change hook failed: {}", err);
            failures.push(err);
        }
    }
}
