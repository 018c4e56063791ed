use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use super::errors::{StoreError, StoreResult};
use super::target::Target;
use crate::common::{Clock, Comment, CommentId, CurrentUser, Entry, Reply, SystemClock};

/// In-memory state of one mounted comment section
///
/// `CommentStore` owns the ordered list of top-level comments (each with one
/// level of replies) and the two sets of entries that currently have an
/// editor or a reply composer open. One store is built per mount and handed
/// to whatever renders it; there is no shared global instance.
///
/// ## Snapshots
///
/// The comment list lives behind an `Arc`. Every mutation goes through
/// `Arc::make_mut`, so a snapshot handed out by [`CommentStore::snapshot`]
/// keeps its contents no matter what happens to the store afterwards.
///
/// ## Failure model
///
/// Every check (signed-in user, target lookup, ownership, id uniqueness) runs
/// before anything is touched. A failed operation leaves the store exactly as
/// it was.
///
/// ## Example Usage
///
/// ```rust
/// use comment_section::common::CurrentUser;
/// use comment_section::store::{CommentStore, Target};
///
/// let user = CurrentUser::new("u1", "Ada Lovelace", "ada.png");
/// let mut store = CommentStore::new(Vec::new(), Some(user))?;
///
/// store.submit("hello".to_string(), "c1".to_string())?;
/// store.reply("hi".to_string(), &Target::comment("c1"), "r1".to_string())?;
/// store.edit("bye".to_string(), &Target::comment("c1"))?;
///
/// assert_eq!(store.comments()[0].text, "bye");
/// assert_eq!(store.comments()[0].replies.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct CommentStore {
    comments: Arc<Vec<Comment>>,
    editing: BTreeSet<CommentId>,
    replying: BTreeSet<CommentId>,
    current_user: Option<CurrentUser>,
    clock: Arc<dyn Clock>,
}

impl CommentStore {
    /// Mount a store over host-supplied data, stamping with wall-clock time
    pub fn new(comments: Vec<Comment>, current_user: Option<CurrentUser>) -> StoreResult<Self> {
        Self::with_clock(comments, current_user, Arc::new(SystemClock))
    }

    /// Mount a store with an explicit clock
    ///
    /// Fails with `DuplicateId` if any id appears twice in `comments`,
    /// replies included.
    pub fn with_clock(
        comments: Vec<Comment>,
        current_user: Option<CurrentUser>,
        clock: Arc<dyn Clock>,
    ) -> StoreResult<Self> {
        let mut seen = HashSet::new();
        for id in comments.iter().flat_map(Comment::ids) {
            if !seen.insert(id.as_str()) {
                return Err(StoreError::duplicate_id(id));
            }
        }

        Ok(Self {
            comments: Arc::new(comments),
            editing: BTreeSet::new(),
            replying: BTreeSet::new(),
            current_user,
            clock,
        })
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// The current comment list as an immutable, cheaply cloned snapshot
    pub fn snapshot(&self) -> Arc<Vec<Comment>> {
        Arc::clone(&self.comments)
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn editing(&self) -> &BTreeSet<CommentId> {
        &self.editing
    }

    pub fn replying(&self) -> &BTreeSet<CommentId> {
        &self.replying
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing.contains(id)
    }

    pub fn is_replying(&self, id: &str) -> bool {
        self.replying.contains(id)
    }

    /// Whether any comment or reply carries `id`
    pub fn contains(&self, id: &str) -> bool {
        self.comments
            .iter()
            .flat_map(Comment::ids)
            .any(|existing| existing == id)
    }

    /// Look up the entry a target points at
    pub fn find(&self, target: &Target) -> StoreResult<Entry<'_>> {
        let comment = &self.comments[self.thread_index(target)?];
        match target {
            Target::Comment(_) => Ok(Entry::Comment(comment)),
            Target::Reply { reply_id, .. } => comment
                .reply(reply_id)
                .map(Entry::Reply)
                .ok_or_else(|| StoreError::not_found(reply_id)),
        }
    }

    /// Append a top-level comment authored by the signed-in user
    pub fn submit(&mut self, text: String, new_id: CommentId) -> StoreResult<Comment> {
        let author = self.require_user()?;
        self.require_unused(&new_id)?;

        let comment = Comment::new(new_id, text, author, self.clock.now());
        log::debug!("submit {}", comment.com_id);
        Arc::make_mut(&mut self.comments).push(comment.clone());
        Ok(comment)
    }

    /// Overwrite the text of a comment or reply and close its editor
    pub fn edit(&mut self, text: String, target: &Target) -> StoreResult<()> {
        self.require_user()?;
        let (parent_idx, reply_idx) = self.locate(target)?;

        log::debug!("edit {}", target);
        let comment = &mut Arc::make_mut(&mut self.comments)[parent_idx];
        match reply_idx {
            Some(idx) => comment.replies[idx].text = text,
            None => comment.text = text,
        }
        self.editing.remove(target.id());
        Ok(())
    }

    /// Add a reply and close the composer that was open on `target`
    ///
    /// Replying to a reply attaches the new entry to that reply's parent
    /// comment, keeping threads one level deep.
    pub fn reply(&mut self, text: String, target: &Target, new_id: CommentId) -> StoreResult<Reply> {
        let author = self.require_user()?;
        let (parent_idx, _) = self.locate(target)?;
        self.require_unused(&new_id)?;

        let reply = Reply::new(new_id, text, author, self.clock.now());
        log::debug!("reply {} to {}", reply.com_id, target);
        Arc::make_mut(&mut self.comments)[parent_idx]
            .replies
            .push(reply.clone());
        self.replying.remove(target.id());
        Ok(reply)
    }

    /// Remove a reply, or a comment together with all its replies
    pub fn delete(&mut self, target: &Target) -> StoreResult<()> {
        self.require_user()?;
        let (parent_idx, reply_idx) = self.locate(target)?;

        log::debug!("delete {}", target);
        let comments = Arc::make_mut(&mut self.comments);
        let removed: Vec<CommentId> = match reply_idx {
            Some(idx) => vec![comments[parent_idx].replies.remove(idx).com_id],
            None => comments.remove(parent_idx).ids().cloned().collect(),
        };

        for id in &removed {
            self.editing.remove(id);
            self.replying.remove(id);
        }
        Ok(())
    }

    /// Open or close the editor on `id`; returns whether it is now open
    pub fn toggle_edit(&mut self, id: &str) -> StoreResult<bool> {
        if !self.contains(id) {
            return Err(StoreError::not_found(id));
        }
        Ok(toggle(&mut self.editing, id))
    }

    /// Open or close the reply composer on `id`; returns whether it is now open
    pub fn toggle_reply(&mut self, id: &str) -> StoreResult<bool> {
        if !self.contains(id) {
            return Err(StoreError::not_found(id));
        }
        Ok(toggle(&mut self.replying, id))
    }

    // Private helper methods

    fn require_user(&self) -> StoreResult<&CurrentUser> {
        self.current_user.as_ref().ok_or(StoreError::Unauthenticated)
    }

    fn require_unused(&self, id: &str) -> StoreResult<()> {
        if self.contains(id) {
            return Err(StoreError::duplicate_id(id));
        }
        Ok(())
    }

    /// Index of the top-level comment a target lives under
    fn thread_index(&self, target: &Target) -> StoreResult<usize> {
        self.comment_index(target.thread_id())
            .ok_or_else(|| match target {
                Target::Comment(id) => StoreError::not_found(id),
                Target::Reply { parent_id, .. } => StoreError::parent_not_found(parent_id),
            })
    }

    /// Index of the parent comment and, for replies, of the reply within it
    fn locate(&self, target: &Target) -> StoreResult<(usize, Option<usize>)> {
        let parent_idx = self.thread_index(target)?;
        match target {
            Target::Comment(_) => Ok((parent_idx, None)),
            Target::Reply { reply_id, .. } => {
                let reply_idx = self.comments[parent_idx]
                    .replies
                    .iter()
                    .position(|r| r.com_id == *reply_id)
                    .ok_or_else(|| StoreError::not_found(reply_id))?;
                Ok((parent_idx, Some(reply_idx)))
            }
        }
    }

    fn comment_index(&self, id: &str) -> Option<usize> {
        self.comments.iter().position(|c| c.com_id == id)
    }
}

fn toggle(set: &mut BTreeSet<CommentId>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FixedClock;
    use crate::view::total_count;
    use chrono::{TimeZone, Utc};

    fn test_user() -> CurrentUser {
        CurrentUser::new("u1", "Ada Lovelace", "ada.png")
    }

    fn other_user() -> CurrentUser {
        CurrentUser::new("u2", "Grace Hopper", "grace.png")
    }

    fn setup_store() -> CommentStore {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        CommentStore::with_clock(Vec::new(), Some(test_user()), Arc::new(FixedClock(at)))
            .expect("Failed to create store")
    }

    /// Store with c1 (replies r1, r2) and c2, all by the test user
    fn setup_populated_store() -> CommentStore {
        let mut store = setup_store();
        store.submit("first".to_string(), "c1".to_string()).unwrap();
        store.submit("second".to_string(), "c2".to_string()).unwrap();
        store
            .reply("r-one".to_string(), &Target::comment("c1"), "r1".to_string())
            .unwrap();
        store
            .reply("r-two".to_string(), &Target::comment("c1"), "r2".to_string())
            .unwrap();
        store
    }

    #[test]
    fn test_submit_scenario() {
        let mut store = setup_store();

        let comment = store.submit("hello".to_string(), "c1".to_string()).unwrap();

        assert_eq!(store.comments().len(), 1);
        assert_eq!(store.comments()[0], comment);
        assert_eq!(comment.com_id, "c1");
        assert_eq!(comment.text, "hello");
        assert_eq!(comment.user_id, "u1");
        assert_eq!(comment.full_name, "Ada Lovelace");
        assert_eq!(
            comment.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );
        assert!(comment.replies.is_empty());
        assert_eq!(total_count(store.comments()), 1);
    }

    #[test]
    fn test_submits_keep_call_order() {
        let mut store = setup_store();
        for i in 0..5 {
            store.submit(format!("text {}", i), format!("c{}", i)).unwrap();
        }

        let ids: Vec<&str> = store.comments().iter().map(|c| c.com_id.as_str()).collect();
        assert_eq!(ids, vec!["c0", "c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn test_reply_scenario() {
        let mut store = setup_store();
        store.submit("hello".to_string(), "c1".to_string()).unwrap();

        store
            .reply("hi".to_string(), &Target::comment("c1"), "r1".to_string())
            .unwrap();

        let replies = &store.comments()[0].replies;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].com_id, "r1");
        assert_eq!(replies[0].text, "hi");
        assert_eq!(total_count(store.comments()), 2);
    }

    #[test]
    fn test_reply_to_reply_is_flattened() {
        let mut store = setup_populated_store();

        store
            .reply(
                "nested".to_string(),
                &Target::reply("c1", "r1"),
                "r3".to_string(),
            )
            .unwrap();

        let ids: Vec<&str> = store.comments()[0]
            .replies
            .iter()
            .map(|r| r.com_id.as_str())
            .collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
        assert!(store.comments()[1].replies.is_empty());
    }

    #[test]
    fn test_reply_closes_composer_on_target() {
        let mut store = setup_populated_store();
        assert!(store.toggle_reply("r1").unwrap());
        assert!(store.toggle_reply("c2").unwrap());

        store
            .reply("x".to_string(), &Target::reply("c1", "r1"), "r3".to_string())
            .unwrap();

        assert!(!store.is_replying("r1"));
        assert!(store.is_replying("c2"));
    }

    #[test]
    fn test_reply_ids_never_reused() {
        let mut store = setup_populated_store();

        let result = store.submit("dup".to_string(), "r1".to_string());
        assert_eq!(result, Err(StoreError::duplicate_id("r1")));

        let result = store.reply("dup".to_string(), &Target::comment("c2"), "c1".to_string());
        assert_eq!(result, Err(StoreError::duplicate_id("c1")));
        assert_eq!(total_count(store.comments()), 4);
    }

    #[test]
    fn test_edit_scenario() {
        let mut store = setup_store();
        store.submit("hello".to_string(), "c1".to_string()).unwrap();
        store
            .reply("hi".to_string(), &Target::comment("c1"), "r1".to_string())
            .unwrap();
        let replies_before = store.comments()[0].replies.clone();

        store.edit("bye".to_string(), &Target::comment("c1")).unwrap();

        assert_eq!(store.comments()[0].text, "bye");
        assert_eq!(store.comments()[0].replies, replies_before);
    }

    #[test]
    fn test_edit_round_trip_restores_equality() {
        let mut store = setup_populated_store();
        let before = store.snapshot();

        store
            .edit("changed".to_string(), &Target::reply("c1", "r2"))
            .unwrap();
        assert_eq!(store.comments()[0].replies[1].text, "changed");
        assert_eq!(store.comments()[0].replies[0], before[0].replies[0]);
        assert_eq!(store.comments()[1], before[1]);

        store
            .edit("r-two".to_string(), &Target::reply("c1", "r2"))
            .unwrap();
        assert_eq!(*store.snapshot(), *before);
    }

    #[test]
    fn test_edit_closes_editor_without_reopening() {
        let mut store = setup_populated_store();
        assert!(store.toggle_edit("c1").unwrap());

        store.edit("a".to_string(), &Target::comment("c1")).unwrap();
        assert!(!store.is_editing("c1"));

        // Editing an entry whose editor was never opened must not open it
        store.edit("b".to_string(), &Target::comment("c1")).unwrap();
        assert!(!store.is_editing("c1"));
    }

    #[test]
    fn test_edit_not_found() {
        let mut store = setup_populated_store();
        let before = store.snapshot();

        assert_eq!(
            store.edit("x".to_string(), &Target::comment("nope")),
            Err(StoreError::not_found("nope"))
        );
        assert_eq!(
            store.edit("x".to_string(), &Target::reply("nope", "r1")),
            Err(StoreError::parent_not_found("nope"))
        );
        assert_eq!(
            store.edit("x".to_string(), &Target::reply("c2", "r1")),
            Err(StoreError::not_found("r1"))
        );
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_delete_scenario() {
        let mut store = setup_store();
        store.submit("hello".to_string(), "c1".to_string()).unwrap();

        store.delete(&Target::comment("c1")).unwrap();

        assert!(store.comments().is_empty());
        assert_eq!(total_count(store.comments()), 0);
    }

    #[test]
    fn test_delete_comment_removes_replies() {
        let mut store = setup_populated_store();
        let before = total_count(store.comments());
        let reply_count = store.comments()[0].replies.len();

        store.delete(&Target::comment("c1")).unwrap();

        assert_eq!(total_count(store.comments()), before - (1 + reply_count));
        assert!(!store.contains("r1"));
        assert!(!store.contains("r2"));
        assert_eq!(store.comments()[0].com_id, "c2");
    }

    #[test]
    fn test_delete_reply() {
        let mut store = setup_populated_store();

        store.delete(&Target::reply("c1", "r1")).unwrap();

        let replies = &store.comments()[0].replies;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].com_id, "r2");
    }

    #[test]
    fn test_delete_drops_stale_mode_ids() {
        let mut store = setup_populated_store();
        store.toggle_edit("c1").unwrap();
        store.toggle_edit("r2").unwrap();
        store.toggle_reply("r1").unwrap();
        store.toggle_reply("c2").unwrap();

        store.delete(&Target::comment("c1")).unwrap();

        assert!(store.editing().is_empty());
        assert_eq!(store.replying().iter().collect::<Vec<_>>(), vec!["c2"]);
    }

    #[test]
    fn test_toggles_are_involutive() {
        let mut store = setup_populated_store();

        assert!(store.toggle_edit("c1").unwrap());
        assert!(store.is_editing("c1"));
        assert!(!store.toggle_edit("c1").unwrap());
        assert!(store.editing().is_empty());

        assert!(store.toggle_reply("r2").unwrap());
        assert!(!store.toggle_reply("r2").unwrap());
        assert!(store.replying().is_empty());
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut store = setup_populated_store();

        assert_eq!(store.toggle_edit("ghost"), Err(StoreError::not_found("ghost")));
        assert_eq!(store.toggle_reply("ghost"), Err(StoreError::not_found("ghost")));
        assert!(store.editing().is_empty());
        assert!(store.replying().is_empty());
    }

    #[test]
    fn test_unauthenticated_mutations_rejected() {
        let comments = setup_populated_store().comments().to_vec();
        let mut store = CommentStore::new(comments.clone(), None).unwrap();

        assert_eq!(
            store.submit("x".to_string(), "c9".to_string()),
            Err(StoreError::Unauthenticated)
        );
        assert_eq!(
            store.edit("x".to_string(), &Target::comment("c1")),
            Err(StoreError::Unauthenticated)
        );
        assert_eq!(
            store.reply("x".to_string(), &Target::comment("c1"), "r9".to_string()),
            Err(StoreError::Unauthenticated)
        );
        assert_eq!(
            store.delete(&Target::comment("c1")),
            Err(StoreError::Unauthenticated)
        );
        assert_eq!(store.comments(), comments.as_slice());
    }

    #[test]
    fn test_any_signed_in_user_edits_and_deletes() {
        let mut store =
            CommentStore::new(setup_populated_store().comments().to_vec(), Some(other_user()))
                .unwrap();

        store
            .edit("edited by u2".to_string(), &Target::comment("c1"))
            .unwrap();
        assert_eq!(store.comments()[0].text, "edited by u2");
        assert_eq!(store.comments()[0].user_id, "u1");

        store.delete(&Target::reply("c1", "r2")).unwrap();
        assert_eq!(store.comments()[0].replies.len(), 1);

        store.delete(&Target::comment("c1")).unwrap();
        assert_eq!(store.comments().len(), 1);
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let mut store = setup_populated_store();
        let snapshot = store.snapshot();

        store.edit("changed".to_string(), &Target::comment("c1")).unwrap();
        store.delete(&Target::comment("c2")).unwrap();

        assert_eq!(snapshot[0].text, "first");
        assert_eq!(snapshot.len(), 2);
        assert!(!Arc::ptr_eq(&snapshot, &store.snapshot()));
    }

    #[test]
    fn test_duplicate_ids_in_initial_data() {
        let mut comments = setup_populated_store().comments().to_vec();
        let copied = comments[0].replies[0].clone();
        comments[1].replies.push(copied);

        let result = CommentStore::new(comments, Some(test_user()));
        assert!(matches!(result, Err(StoreError::DuplicateId { id }) if id == "r1"));
    }

    #[test]
    fn test_find() {
        let store = setup_populated_store();

        let entry = store.find(&Target::reply("c1", "r2")).unwrap();
        assert!(matches!(entry, Entry::Reply(_)));
        assert_eq!(entry.text(), "r-two");

        let entry = store.find(&Target::comment("c2")).unwrap();
        assert!(matches!(entry, Entry::Comment(_)));
        assert!(store.find(&Target::comment("r1")).is_err());

        assert!(matches!(
            store.find(&Target::reply("c9", "r1")),
            Err(StoreError::ParentNotFound { .. })
        ));
        assert!(matches!(
            store.find(&Target::reply("c2", "r1")),
            Err(StoreError::NotFound { .. })
        ));
    }
}
