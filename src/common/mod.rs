pub mod clock;
pub mod comment;
pub mod env;
pub mod event;
pub mod identity;
pub mod ids;

pub use clock::{Clock, FixedClock, SystemClock};
pub use comment::*;
pub use env::{EnvProvider, SystemEnvProvider};
pub use event::*;
pub use identity::*;
pub use ids::{IdSupplier, SequentialIds, UuidSupplier};

#[cfg(test)]
pub use env::MockEnvProvider;
