pub mod projection;

pub use projection::{
    EntryView, ThreadView, comments_title, display_count, time_ago, total_count,
};
