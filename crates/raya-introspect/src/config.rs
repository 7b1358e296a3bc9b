//! Introspection configuration
//!
//! Selects which filter table the queries apply and how vacant descriptor
//! slots are rendered. Loadable from TOML:
//!
//! ```toml
//! profile = "canonical"       # or "legacy"
//! null_entries = "placeholder" # or "omit"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filter::MemberFilter;

/// Which filter table the queries apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterProfile {
    /// Field listings render simple names; members are public only; methods
    /// are public instance only
    #[default]
    Canonical,
    /// Field listings render full signatures; members and methods include
    /// every visibility and binding
    Legacy,
}

/// How a vacant descriptor slot appears in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullEntryPolicy {
    /// Render as a single space, keeping positions aligned with the slots
    #[default]
    Placeholder,
    /// Drop the entry
    Omit,
}

/// Introspection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntrospectConfig {
    /// Filter table
    #[serde(default)]
    pub profile: FilterProfile,
    /// Vacant slot rendering
    #[serde(default)]
    pub null_entries: NullEntryPolicy,
}

impl IntrospectConfig {
    /// Canonical filters, placeholder rendering
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the filter profile
    pub fn with_profile(mut self, profile: FilterProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Replace the null-entry policy
    pub fn with_null_entries(mut self, policy: NullEntryPolicy) -> Self {
        self.null_entries = policy;
        self
    }

    /// Parse a config from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded introspection config");
        Ok(config)
    }

    /// Parse a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Filter for the "all members" query
    pub fn members_filter(&self) -> MemberFilter {
        match self.profile {
            FilterProfile::Canonical => MemberFilter::PUBLIC,
            FilterProfile::Legacy => MemberFilter::ALL,
        }
    }

    /// Filter for the "methods" query
    pub fn methods_filter(&self) -> MemberFilter {
        match self.profile {
            FilterProfile::Canonical => MemberFilter::PUBLIC_INSTANCE,
            FilterProfile::Legacy => MemberFilter::ALL,
        }
    }

    /// Whether field listings render full signatures instead of names
    pub fn full_field_signatures(&self) -> bool {
        self.profile == FilterProfile::Legacy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntrospectConfig::new();
        assert_eq!(config.profile, FilterProfile::Canonical);
        assert_eq!(config.null_entries, NullEntryPolicy::Placeholder);
        assert_eq!(config.members_filter(), MemberFilter::PUBLIC);
        assert_eq!(config.methods_filter(), MemberFilter::PUBLIC_INSTANCE);
        assert!(!config.full_field_signatures());
    }

    #[test]
    fn test_legacy_filters() {
        let config = IntrospectConfig::new().with_profile(FilterProfile::Legacy);
        assert_eq!(config.members_filter(), MemberFilter::ALL);
        assert_eq!(config.methods_filter(), MemberFilter::ALL);
        assert!(config.full_field_signatures());
    }

    #[test]
    fn test_parse_toml() {
        let config = IntrospectConfig::from_toml_str(
            r#"
profile = "legacy"
null_entries = "omit"
"#,
        )
        .unwrap();
        assert_eq!(config.profile, FilterProfile::Legacy);
        assert_eq!(config.null_entries, NullEntryPolicy::Omit);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = IntrospectConfig::from_toml_str("").unwrap();
        assert_eq!(config, IntrospectConfig::default());
    }

    #[test]
    fn test_unknown_profile_rejected() {
        let result = IntrospectConfig::from_toml_str(r#"profile = "strict""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = IntrospectConfig::from_toml_str(r#"sort = true"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_round_trip() {
        let config = IntrospectConfig::new().with_null_entries(NullEntryPolicy::Omit);
        let serialized = toml::to_string(&config).unwrap();
        let deserialized = IntrospectConfig::from_toml_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
