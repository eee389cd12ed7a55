//! Scope configuration (environment-driven).

use hrscope_core::CoreResult;

use crate::EntityIdAliases;

/// Environment variable holding a comma-separated entity id alias list.
pub const ENTITY_ID_ALIASES_ENV: &str = "HRSCOPE_ENTITY_ID_ALIASES";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeConfig {
    pub entity_id_aliases: EntityIdAliases,
}

impl ScopeConfig {
    /// Load from the process environment.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an injected lookup (tests, embedded hosts).
    ///
    /// Unset keys fall back to defaults. A key that is set but yields no
    /// usable alias is an error rather than a silent default.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let entity_id_aliases = match lookup(ENTITY_ID_ALIASES_ENV) {
            Some(raw) => EntityIdAliases::parse_list(&raw)?,
            None => EntityIdAliases::default(),
        };

        tracing::debug!(
            aliases = ?entity_id_aliases.names().collect::<Vec<_>>(),
            "scope config loaded"
        );

        Ok(Self { entity_id_aliases })
    }
}
