//! Deterministic Skat rules engine plus the plumbing to drive it from three
//! remote seats in lock-step: a replayable action journal, a framed wire
//! protocol, a per-table session coordinator, and a file-backed user registry.
//!
//! The engine itself ([`domain`]) is a synchronous, I/O-free value; everything
//! async lives in [`server`] and [`routes`].

pub mod config;
pub mod domain;
pub mod errors;
pub mod journal;
pub mod proto;
pub mod registry;
pub mod routes;
pub mod server;
pub mod telemetry;

pub use errors::DomainError;
