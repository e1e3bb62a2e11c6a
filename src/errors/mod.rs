//! Error handling for the rules engine and its hosts.

pub mod domain;

pub use domain::DomainError;
