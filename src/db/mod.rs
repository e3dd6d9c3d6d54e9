//! Postgres access.
//!
//! Every query in `tasks` is scoped by an `AuthenticatedUserId`: creates stamp it
//! as the owner, and reads, updates and deletes filter on it. A task owned by
//! someone else is indistinguishable from one that does not exist.

pub mod pool;
pub mod tasks;
pub mod users;

pub use pool::{connect, run_migrations};
