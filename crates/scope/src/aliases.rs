//! Ordered preference list of upstream field names for the entity id.

use hrscope_core::{CoreError, CoreResult, EntityId};
use hrscope_identity::Identifiers;

/// Field names tried, in order, when no override is configured.
pub const DEFAULT_ENTITY_ID_ALIASES: &[&str] =
    &["entityId", "companyEntityId", "company_entity_id", "entity_id"];

/// Upstream field names that may carry the entity id, highest precedence first.
///
/// Call sites have historically populated different names for the same
/// concept. At most one value is authoritative: the first alias present wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIdAliases {
    names: Vec<String>,
}

impl EntityIdAliases {
    /// Build from an explicit list. Blank and duplicate names are dropped.
    pub fn new<I, S>(names: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || out.iter().any(|n| n == name) {
                continue;
            }
            out.push(name.to_string());
        }

        if out.is_empty() {
            return Err(CoreError::config("entity id alias list is empty"));
        }
        Ok(Self { names: out })
    }

    /// Parse a comma-separated list, e.g. `"entityId, entity_id"`.
    pub fn parse_list(raw: &str) -> CoreResult<Self> {
        Self::new(raw.split(','))
    }

    /// Append a lower-precedence alias.
    pub fn with_alias(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() && !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// First alias with a value, as `(field_name, entity_id)`.
    pub fn lookup<'a>(&'a self, identifiers: &Identifiers) -> Option<(&'a str, EntityId)> {
        self.names.iter().find_map(|name| {
            identifiers
                .get(name)
                .and_then(EntityId::parse)
                .map(|id| (name.as_str(), id))
        })
    }
}

impl Default for EntityIdAliases {
    fn default() -> Self {
        Self {
            names: DEFAULT_ENTITY_ID_ALIASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(pairs: &[(&str, &str)]) -> Identifiers {
        let mut ids = Identifiers::new();
        for (k, v) in pairs {
            ids.insert(*k, *v);
        }
        ids
    }

    #[test]
    fn first_present_alias_wins() {
        let aliases = EntityIdAliases::default();
        let found = aliases.lookup(&ids(&[("entity_id", "late"), ("companyEntityId", "early")]));

        let (field, id) = found.unwrap();
        assert_eq!(field, "companyEntityId");
        assert_eq!(id.as_str(), "early");
    }

    #[test]
    fn nothing_present_is_none() {
        let aliases = EntityIdAliases::default();
        assert!(aliases.lookup(&ids(&[("department", "ops")])).is_none());
    }

    #[test]
    fn parse_list_trims_and_dedupes() {
        let aliases = EntityIdAliases::parse_list(" legalEntityId , entityId,,entityId ").unwrap();
        assert_eq!(aliases.names().collect::<Vec<_>>(), vec!["legalEntityId", "entityId"]);
    }

    #[test]
    fn empty_list_is_config_error() {
        let err = EntityIdAliases::parse_list(" , ").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn appended_alias_has_lowest_precedence() {
        let aliases = EntityIdAliases::default().with_alias("legal_entity_id");
        let found = aliases.lookup(&ids(&[("legal_entity_id", "x"), ("entity_id", "y")]));
        assert_eq!(found.unwrap().1.as_str(), "y");
    }
}
