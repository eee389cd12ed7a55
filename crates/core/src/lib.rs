//! `hrscope-core` — identifier and error primitives shared by every scope crate.
//!
//! This crate contains **pure** types (no IO, no logging setup).

pub mod error;
pub mod id;

pub use error::{CoreError, CoreResult};
pub use id::{EntityId, SessionId, TenantId};
