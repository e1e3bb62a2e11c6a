//! Table hosting: one coordinator per game, per-connection protocol tasks.

pub mod connection;
pub mod coordinator;

pub use connection::serve;
pub use coordinator::{Table, TableConfig};
