//! Loader policies for invalid and duplicate records

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// What to do with records missing required fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaPolicy {
    /// Reject the whole manifest if any record is invalid
    #[default]
    Strict,
    /// Drop invalid records and report their indices
    Skip,
}

/// What to do when the same id is listed more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the last occurrence and report the overwritten ids
    #[default]
    LastWins,
    /// Reject the manifest
    Reject,
}

impl fmt::Display for SchemaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaPolicy::Strict => write!(f, "strict"),
            SchemaPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::LastWins => write!(f, "last-wins"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Options controlling how a manifest is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Invalid record handling
    pub schema: SchemaPolicy,
    /// Duplicate id handling
    pub duplicates: DuplicatePolicy,
}

impl LoadOptions {
    /// Creates options with explicit policies
    pub fn new(schema: SchemaPolicy, duplicates: DuplicatePolicy) -> Self {
        Self { schema, duplicates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let options = LoadOptions::default();
        assert_eq!(options.schema, SchemaPolicy::Strict);
        assert_eq!(options.duplicates, DuplicatePolicy::LastWins);
    }

    #[test]
    fn test_display() {
        assert_eq!(SchemaPolicy::Skip.to_string(), "skip");
        assert_eq!(DuplicatePolicy::LastWins.to_string(), "last-wins");
    }

    #[test]
    fn test_deserialize_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            schema: SchemaPolicy,
            duplicates: DuplicatePolicy,
        }
        let parsed: Wrapper =
            toml::from_str("schema = \"skip\"\nduplicates = \"last-wins\"").unwrap();
        assert_eq!(parsed.schema, SchemaPolicy::Skip);
        assert_eq!(parsed.duplicates, DuplicatePolicy::LastWins);
    }
}
