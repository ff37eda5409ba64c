//! CLI argument parsing module for modcmp

use crate::manifest::{DuplicatePolicy, SchemaPolicy};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parse a timeout: plain seconds, or with an `ms`, `s` or `m` suffix
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty timeout".to_string());
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix("ms") {
        (n, "ms")
    } else if let Some(n) = s.strip_suffix('s') {
        (n, "s")
    } else if let Some(n) = s.strip_suffix('m') {
        (n, "m")
    } else {
        (s, "s")
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid number in timeout: {}", num_str))?;
    if num == 0 {
        return Err("timeout must be greater than zero".to_string());
    }

    Ok(match unit {
        "ms" => Duration::from_millis(num),
        "m" => Duration::from_secs(
            num.checked_mul(60)
                .ok_or_else(|| format!("timeout too large: {}", s))?,
        ),
        _ => Duration::from_secs(num),
    })
}

/// Compare two component manifests
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modcmp",
    version,
    about = "Compare two installed-component manifests and report version drift",
    after_help = "EXIT CODES:
    0  Report emitted (mismatches included)
    1  Unexpected failure
    2  Configuration or command-line usage error
    3  Manifest could not be loaded
    4  A manifest has no components"
)]
pub struct CliArgs {
    /// Left manifest (default: client/mods_client.json)
    pub left: Option<PathBuf>,

    /// Right manifest (default: server/mod_server.json)
    pub right: Option<PathBuf>,

    /// Config file (default: ./modcmp.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Label shown for the left manifest
    #[arg(long, value_name = "NAME")]
    pub left_label: Option<String>,

    /// Label shown for the right manifest
    #[arg(long, value_name = "NAME")]
    pub right_label: Option<String>,

    // Loader policies
    /// How to treat records missing an id or version
    #[arg(long, value_enum)]
    pub schema_policy: Option<SchemaPolicy>,

    /// How to treat ids listed more than once
    #[arg(long, value_enum)]
    pub duplicate_policy: Option<DuplicatePolicy>,

    // Enrichment
    /// Look up display names in the online catalog
    #[arg(long)]
    pub enrich: bool,

    /// Per-lookup timeout (e.g. 5, 500ms, 2s)
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout)]
    pub enrich_timeout: Option<Duration>,

    /// Catalog API root
    #[arg(long, value_name = "URL")]
    pub catalog_url: Option<String>,

    // Diagnostics
    /// Where to write the error log on failure (default: modcmp_error.log)
    #[arg(long, value_name = "FILE")]
    pub error_log: Option<PathBuf>,

    // Output options
    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output and debug logging
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Print only the summary line
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Returns true if a progress display is appropriate
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
