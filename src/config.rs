//! Configuration file and settings resolution
//!
//! Settings come from (highest priority first):
//! 1. Command-line flags
//! 2. The config file (`--config FILE`, or `modcmp.toml` in the working directory)
//! 3. Built-in defaults
//!
//! Relative manifest paths are resolved against the working directory.

use crate::catalog::{EnrichOptions, DEFAULT_CONCURRENCY, DEFAULT_LOOKUP_TIMEOUT, MODRINTH_API_URL};
use crate::cli::CliArgs;
use crate::domain::Side;
use crate::error::ConfigError;
use crate::manifest::{DuplicatePolicy, LoadOptions, SchemaPolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "modcmp.toml";

/// Default left manifest location
pub const DEFAULT_LEFT_PATH: &str = "client/mods_client.json";

/// Default right manifest location
pub const DEFAULT_RIGHT_PATH: &str = "server/mod_server.json";

/// Default error log location
pub const DEFAULT_ERROR_LOG: &str = "modcmp_error.log";

/// Contents of a config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub manifests: ManifestsSection,
    pub loader: LoaderSection,
    pub enrichment: EnrichmentSection,
    pub diagnostics: DiagnosticsSection,
}

/// `[manifests]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestsSection {
    pub left: Option<PathBuf>,
    pub right: Option<PathBuf>,
    pub left_label: Option<String>,
    pub right_label: Option<String>,
}

/// `[loader]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderSection {
    pub schema_policy: Option<SchemaPolicy>,
    pub duplicate_policy: Option<DuplicatePolicy>,
}

/// `[enrichment]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnrichmentSection {
    pub enabled: Option<bool>,
    pub catalog_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub concurrency: Option<usize>,
}

/// `[diagnostics]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsSection {
    pub error_log: Option<PathBuf>,
}

impl ConfigFile {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(path, &content)
    }

    /// Parse config file content
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the explicit config file, or `modcmp.toml` in `dir` if it exists
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Option<Self>, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config file");
            return Self::load(&candidate).map(Some);
        }

        Ok(None)
    }
}

/// Catalog settings when enrichment is on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentSettings {
    /// Catalog API root
    pub catalog_url: String,
    /// Timeout and concurrency
    pub options: EnrichOptions,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub left: PathBuf,
    pub right: PathBuf,
    pub left_label: String,
    pub right_label: String,
    pub load: LoadOptions,
    /// `None` when enrichment is disabled
    pub enrichment: Option<EnrichmentSettings>,
    pub error_log: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            left: PathBuf::from(DEFAULT_LEFT_PATH),
            right: PathBuf::from(DEFAULT_RIGHT_PATH),
            left_label: Side::Left.default_label().to_string(),
            right_label: Side::Right.default_label().to_string(),
            load: LoadOptions::default(),
            enrichment: None,
            error_log: PathBuf::from(DEFAULT_ERROR_LOG),
        }
    }
}

impl Settings {
    /// Resolve settings for the CLI invocation, discovering a config file in the working directory
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let file = ConfigFile::discover(args.config.as_deref(), &cwd)?;
        Self::resolve(args, file.unwrap_or_default())
    }

    /// Merge CLI flags over a config file over defaults
    pub fn resolve(args: &CliArgs, file: ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let enrich_enabled = args.enrich || file.enrichment.enabled.unwrap_or(false);
        let enrichment = if enrich_enabled {
            let timeout = match (args.enrich_timeout, file.enrichment.timeout_secs) {
                (Some(timeout), _) => timeout,
                (None, Some(0)) => {
                    return Err(ConfigError::Invalid {
                        key: "enrichment.timeout_secs".to_string(),
                        message: "must be greater than zero".to_string(),
                    })
                }
                (None, Some(secs)) => Duration::from_secs(secs),
                (None, None) => DEFAULT_LOOKUP_TIMEOUT,
            };

            let concurrency = file.enrichment.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
            if concurrency == 0 {
                return Err(ConfigError::Invalid {
                    key: "enrichment.concurrency".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }

            Some(EnrichmentSettings {
                catalog_url: args
                    .catalog_url
                    .clone()
                    .or(file.enrichment.catalog_url)
                    .unwrap_or_else(|| MODRINTH_API_URL.to_string()),
                options: EnrichOptions {
                    timeout,
                    concurrency,
                },
            })
        } else {
            None
        };

        let left_label = args
            .left_label
            .clone()
            .or(file.manifests.left_label)
            .unwrap_or(defaults.left_label);
        let right_label = args
            .right_label
            .clone()
            .or(file.manifests.right_label)
            .unwrap_or(defaults.right_label);
        if left_label.trim().is_empty() || right_label.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "manifests.left_label/right_label".to_string(),
                message: "labels must not be empty".to_string(),
            });
        }

        Ok(Settings {
            left: args
                .left
                .clone()
                .or(file.manifests.left)
                .unwrap_or(defaults.left),
            right: args
                .right
                .clone()
                .or(file.manifests.right)
                .unwrap_or(defaults.right),
            left_label,
            right_label,
            load: LoadOptions {
                schema: args
                    .schema_policy
                    .or(file.loader.schema_policy)
                    .unwrap_or_default(),
                duplicates: args
                    .duplicate_policy
                    .or(file.loader.duplicate_policy)
                    .unwrap_or_default(),
            },
            enrichment,
            error_log: args
                .error_log
                .clone()
                .or(file.diagnostics.error_log)
                .unwrap_or(defaults.error_log),
        })
    }

    /// Path of the manifest for a side
    pub fn path(&self, side: Side) -> &Path {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Label for a side
    pub fn label(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_label,
            Side::Right => &self.right_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["modcmp"];
        argv.extend(extra);
        CliArgs::parse_from(argv)
    }

    fn parse(content: &str) -> ConfigFile {
        ConfigFile::parse(Path::new("modcmp.toml"), content).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&args(&[]), ConfigFile::default()).unwrap();
        assert_eq!(settings.left, PathBuf::from("client/mods_client.json"));
        assert_eq!(settings.right, PathBuf::from("server/mod_server.json"));
        assert_eq!(settings.left_label, "client");
        assert_eq!(settings.right_label, "server");
        assert_eq!(settings.load, LoadOptions::default());
        assert!(settings.enrichment.is_none());
        assert_eq!(settings.error_log, PathBuf::from("modcmp_error.log"));
    }

    #[test]
    fn test_parse_full_file() {
        let file = parse(
            r#"
[manifests]
left = "a.json"
right = "b.json"
left_label = "laptop"
right_label = "prod"

[loader]
schema_policy = "skip"
duplicate_policy = "reject"

[enrichment]
enabled = true
catalog_url = "http://localhost:9000/v2"
timeout_secs = 2
concurrency = 4

[diagnostics]
error_log = "logs/err.log"
"#,
        );

        let settings = Settings::resolve(&args(&[]), file).unwrap();
        assert_eq!(settings.left, PathBuf::from("a.json"));
        assert_eq!(settings.right_label, "prod");
        assert_eq!(settings.load.schema, SchemaPolicy::Skip);
        assert_eq!(settings.load.duplicates, DuplicatePolicy::Reject);
        let enrichment = settings.enrichment.unwrap();
        assert_eq!(enrichment.catalog_url, "http://localhost:9000/v2");
        assert_eq!(enrichment.options.timeout, Duration::from_secs(2));
        assert_eq!(enrichment.options.concurrency, 4);
        assert_eq!(settings.error_log, PathBuf::from("logs/err.log"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = parse(
            r#"
[manifests]
left = "a.json"
[loader]
schema_policy = "skip"
"#,
        );
        let settings = Settings::resolve(
            &args(&["x.json", "--schema-policy", "strict", "--left-label", "me"]),
            file,
        )
        .unwrap();
        assert_eq!(settings.left, PathBuf::from("x.json"));
        assert_eq!(settings.right, PathBuf::from("server/mod_server.json"));
        assert_eq!(settings.load.schema, SchemaPolicy::Strict);
        assert_eq!(settings.label(Side::Left), "me");
    }

    #[test]
    fn test_enrich_flag_uses_defaults() {
        let settings = Settings::resolve(&args(&["--enrich"]), ConfigFile::default()).unwrap();
        let enrichment = settings.enrichment.unwrap();
        assert_eq!(enrichment.catalog_url, MODRINTH_API_URL);
        assert_eq!(enrichment.options, EnrichOptions::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ConfigFile::parse(Path::new("modcmp.toml"), "[loader]\nstrictness = 1\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_bad_policy_value_rejected() {
        let err = ConfigFile::parse(
            Path::new("modcmp.toml"),
            "[loader]\nschema_policy = \"lenient\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("modcmp.toml"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let file = parse("[enrichment]\nenabled = true\nconcurrency = 0\n");
        let err = Settings::resolve(&args(&[]), file).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let file = parse("[enrichment]\nenabled = true\ntimeout_secs = 0\n");
        assert!(Settings::resolve(&args(&[]), file).is_err());
    }

    #[test]
    fn test_empty_label_rejected() {
        assert!(Settings::resolve(&args(&["--left-label", " "]), ConfigFile::default()).is_err());
    }

    #[test]
    fn test_discover_in_dir() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ConfigFile::discover(None, dir.path()).unwrap(), None);

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[manifests]\nleft = \"mine.json\"\n",
        )
        .unwrap();
        let file = ConfigFile::discover(None, dir.path()).unwrap().unwrap();
        assert_eq!(file.manifests.left, Some(PathBuf::from("mine.json")));
    }

    #[test]
    fn test_discover_explicit_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = ConfigFile::discover(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
