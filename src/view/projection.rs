use chrono::{DateTime, Utc};

use crate::common::{Comment, CommentId, Entry};
use crate::store::CommentStore;

const TIME_UNITS: [(&str, i64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
    ("second", 1),
];

/// Number of comments plus the number of replies under them
pub fn total_count(comments: &[Comment]) -> usize {
    comments.iter().map(|c| 1 + c.replies.len()).sum()
}

/// Count to show in the section header.
///
/// A host-supplied override wins unless it is zero, which counts as unset.
pub fn display_count(comments: &[Comment], count_override: Option<usize>) -> usize {
    count_override
        .filter(|n| *n > 0)
        .unwrap_or_else(|| total_count(comments))
}

/// Section header such as `"3 Comments"`.
///
/// The noun follows the computed total, not the override.
pub fn comments_title(comments: &[Comment], count_override: Option<usize>) -> String {
    let noun = if total_count(comments) == 1 {
        "Comment"
    } else {
        "Comments"
    };
    format!("{} {}", display_count(comments, count_override), noun)
}

/// Relative label for `timestamp` as seen at `now`, e.g. `"5 minutes ago"`
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - timestamp).num_seconds();

    for (label, seconds) in TIME_UNITS {
        let interval = elapsed / seconds;
        if interval >= 1 {
            return format!(
                "{} {}{} ago",
                interval,
                label,
                if interval > 1 { "s" } else { "" }
            );
        }
    }

    "just now".to_string()
}

/// One rendered row of the thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView<'a> {
    pub entry: Entry<'a>,
    /// Set for replies
    pub parent_id: Option<&'a CommentId>,
    pub editing: bool,
    pub replying: bool,
    /// The signed-in user wrote this entry and may edit or delete it
    pub owned: bool,
    /// Present when timestamps are shown and the entry has one
    pub time_label: Option<String>,
}

/// Read-only projection of a store into display rows.
///
/// Rows come out in display order: each comment followed by its replies.
pub struct ThreadView<'a> {
    store: &'a CommentStore,
    now: DateTime<Utc>,
    show_timestamp: bool,
}

impl<'a> ThreadView<'a> {
    pub fn new(store: &'a CommentStore, now: DateTime<Utc>) -> Self {
        Self {
            store,
            now,
            show_timestamp: true,
        }
    }

    pub fn show_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.store.comments().is_empty()
    }

    pub fn total(&self) -> usize {
        total_count(self.store.comments())
    }

    pub fn rows(&self) -> Vec<EntryView<'a>> {
        let store = self.store;
        let mut rows = Vec::with_capacity(self.total());

        for comment in store.comments() {
            rows.push(self.row(Entry::Comment(comment), None));
            for reply in &comment.replies {
                rows.push(self.row(Entry::Reply(reply), Some(&comment.com_id)));
            }
        }

        rows
    }

    fn row(&self, entry: Entry<'a>, parent_id: Option<&'a CommentId>) -> EntryView<'a> {
        let id = entry.com_id();
        let owned = self
            .store
            .current_user()
            .is_some_and(|user| user.id == entry.user_id());
        let time_label = if self.show_timestamp {
            entry.timestamp().map(|at| time_ago(at, self.now))
        } else {
            None
        };

        EntryView {
            entry,
            parent_id,
            editing: self.store.is_editing(id),
            replying: self.store.is_replying(id),
            owned,
            time_label,
        }
    }
}
