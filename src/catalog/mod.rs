//! Catalog lookups for display metadata
//!
//! This module provides:
//! - The `CatalogLookup` capability injected into the comparator
//! - A no-op catalog for offline runs and tests
//! - A Modrinth-backed catalog over a retrying HTTP client
//! - Concurrent, time-bounded enrichment of a set of ids
//!
//! Nothing here can fail a comparison: every error or timeout becomes
//! `MetadataEntry::Unknown`.

mod client;
mod modrinth;

pub use client::HttpClient;
pub use modrinth::{ModrinthCatalog, MODRINTH_API_URL};

use crate::domain::{ComponentMetadata, MetadataEntry};
use crate::error::CatalogError;
use crate::progress::Progress;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Default per-lookup timeout
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of lookups in flight
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Trait for metadata catalogs
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Catalog name for logs and reports
    fn name(&self) -> &'static str;

    /// Look up one component id; `Ok(None)` if the catalog does not know it
    async fn lookup(&self, id: &str) -> Result<Option<ComponentMetadata>, CatalogError>;
}

/// Catalog that knows nothing
///
/// Used when enrichment is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCatalog;

#[async_trait]
impl CatalogLookup for NoOpCatalog {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn lookup(&self, _id: &str) -> Result<Option<ComponentMetadata>, CatalogError> {
        Ok(None)
    }
}

/// Limits applied to an enrichment pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Upper bound for each lookup
    pub timeout: Duration,
    /// Lookups allowed in flight at once
    pub concurrency: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_LOOKUP_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Look up every id concurrently and collect the outcomes by id
///
/// Each lookup runs in its own task under `options.timeout`. The returned
/// map has exactly one entry per input id.
pub async fn enrich<I>(
    catalog: Arc<dyn CatalogLookup>,
    ids: I,
    options: &EnrichOptions,
    progress: &Progress,
) -> BTreeMap<String, MetadataEntry>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let timeout = options.timeout;
    let mut tasks = JoinSet::new();
    let mut entries = BTreeMap::new();

    for id in ids {
        let id: String = id.into();
        entries.insert(id.clone(), MetadataEntry::Unknown);

        let catalog = Arc::clone(&catalog);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return (id, MetadataEntry::Unknown);
            };
            let entry = lookup_with_timeout(catalog.as_ref(), &id, timeout).await;
            (id, entry)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        progress.inc();
        match joined {
            Ok((id, entry)) => {
                entries.insert(id, entry);
            }
            Err(e) => warn!("catalog lookup task failed: {}", e),
        }
    }

    entries
}

async fn lookup_with_timeout(
    catalog: &dyn CatalogLookup,
    id: &str,
    timeout: Duration,
) -> MetadataEntry {
    match tokio::time::timeout(timeout, catalog.lookup(id)).await {
        Ok(Ok(found)) => MetadataEntry::from(found),
        Ok(Err(e)) => {
            debug!(id, catalog = catalog.name(), "lookup failed: {}", e);
            MetadataEntry::Unknown
        }
        Err(_) => {
            debug!(
                id,
                catalog = catalog.name(),
                "{}",
                CatalogError::timeout(id, catalog.name())
            );
            MetadataEntry::Unknown
        }
    }
}
