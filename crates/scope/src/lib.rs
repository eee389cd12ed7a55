//! `hrscope-scope` — tenant-scope resolution and staleness guard.
//!
//! Every data-fetching component needs to know, at read time, whether it is
//! safe to issue tenant-scoped requests. This crate derives a normalized
//! [`ScopeDescriptor`] from the current identity snapshot and keeps the last
//! fully valid scope around, so a momentarily incomplete snapshot (route
//! change, background refresh) reads as "not ready" under the *same* tenant
//! instead of flickering to "unscoped" or, worse, to a different tenant.
//!
//! - No IO
//! - No panics
//! - No global state: retained scope is owned by a session or a store

pub mod aliases;
pub mod config;
pub mod descriptor;
pub mod normalize;
pub mod readiness;
pub mod resolver;
pub mod retained;
pub mod session;
pub mod store;

pub use aliases::EntityIdAliases;
pub use config::ScopeConfig;
pub use descriptor::{RequestScope, ScopeDescriptor};
pub use normalize::{EntitySource, NormalizedScope, normalize};
pub use readiness::ReadinessPolicy;
pub use resolver::ScopeResolver;
pub use retained::{LastGoodScope, RetainedScope, ScopeTransition};
pub use session::ScopeSession;
pub use store::SessionScopeStore;
