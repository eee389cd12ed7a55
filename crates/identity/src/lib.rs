//! `hrscope-identity` — the upstream identity boundary.
//!
//! The identity provider (session lookup, employee fetches) lives elsewhere.
//! This crate only models what it hands out: a readable snapshot that changes
//! over time, and a pull-based source trait for reading the current one.

pub mod decode;
pub mod employee;
pub mod snapshot;
pub mod source;

pub use employee::{EmployeeRecord, SessionUser};
pub use snapshot::{IdentitySnapshot, Identifiers};
pub use source::{IdentitySource, SharedIdentitySource};
