pub mod comment_store;
pub mod errors;
pub mod target;

pub use comment_store::CommentStore;
pub use errors::{GatewayError, GatewayResult, StoreError, StoreResult};
pub use target::Target;
