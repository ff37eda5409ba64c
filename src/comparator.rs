//! Comparison workflow
//!
//! This module coordinates one run: load left → load right → reconcile →
//! optional catalog enrichment → report. A load or reconcile failure ends
//! the run; catalog failures never do.

use crate::catalog::{enrich, CatalogLookup, EnrichOptions, HttpClient, ModrinthCatalog, NoOpCatalog};
use crate::config::Settings;
use crate::domain::{ComparisonReport, LoadedManifest, ManifestSummary, MetadataEntry, Side};
use crate::error::{AppError, ReconcileError};
use crate::manifest::load;
use crate::progress::Progress;
use crate::reconcile::reconcile;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs a comparison with resolved settings
pub struct Comparator {
    settings: Settings,
    catalog: Arc<dyn CatalogLookup>,
}

impl Comparator {
    /// Create a comparator, building the catalog the settings ask for
    pub fn new(settings: Settings) -> Self {
        let catalog: Arc<dyn CatalogLookup> = match &settings.enrichment {
            Some(enrichment) => match HttpClient::new() {
                Ok(client) => Arc::new(ModrinthCatalog::with_base_url(
                    client,
                    enrichment.catalog_url.clone(),
                )),
                Err(e) => {
                    warn!("catalog lookups disabled: {}", e);
                    Arc::new(NoOpCatalog)
                }
            },
            None => Arc::new(NoOpCatalog),
        };

        Self { settings, catalog }
    }

    /// Create a comparator with a custom catalog (for testing)
    pub fn with_catalog(settings: Settings, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self { settings, catalog }
    }

    /// Run the comparison without progress display
    pub async fn run(&self) -> Result<ComparisonReport, AppError> {
        self.run_with_progress(false).await
    }

    /// Run the comparison with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<ComparisonReport, AppError> {
        let mut progress = Progress::new(show_progress);

        // Step 1: Load both manifests
        let left = self.load_side(Side::Left, &mut progress)?;
        let right = self.load_side(Side::Right, &mut progress)?;
        progress.clear();

        // Step 2: Reconcile
        let result = reconcile(&left.components, &right.components).map_err(|source| {
            let side = match &source {
                ReconcileError::EmptyInput { side } => *side,
            };
            AppError::Reconcile {
                label: self.settings.label(side).to_string(),
                source,
            }
        })?;
        info!(
            matched = result.matched().len(),
            mismatched = result.mismatched().len(),
            left_only = result.left_only().len(),
            right_only = result.right_only().len(),
            "reconciled manifests"
        );

        let report = ComparisonReport::new(
            ManifestSummary::from_loaded(Side::Left, self.settings.label(Side::Left), &left),
            ManifestSummary::from_loaded(Side::Right, self.settings.label(Side::Right), &right),
            result,
        );

        // Step 3: Enrich for display
        let Some(enrichment) = &self.settings.enrichment else {
            return Ok(report);
        };
        let metadata = self
            .enrich_report(&report, &enrichment.options, &mut progress)
            .await;

        Ok(report.with_metadata(metadata))
    }

    fn load_side(&self, side: Side, progress: &mut Progress) -> Result<LoadedManifest, AppError> {
        let label = self.settings.label(side);
        let path = self.settings.path(side);
        progress.stage(&format!("Loading {} manifest...", label));

        let loaded = load(path, &self.settings.load).map_err(|source| AppError::Manifest {
            label: label.to_string(),
            source,
        })?;

        debug!(
            side = %side,
            path = %path.display(),
            components = loaded.components.len(),
            skipped = loaded.skipped.len(),
            overwritten = loaded.overwritten.len(),
            "loaded manifest"
        );
        Ok(loaded)
    }

    async fn enrich_report(
        &self,
        report: &ComparisonReport,
        options: &EnrichOptions,
        progress: &mut Progress,
    ) -> BTreeMap<String, MetadataEntry> {
        let ids: Vec<String> = report.result.all_ids().map(str::to_string).collect();
        debug!(catalog = self.catalog.name(), ids = ids.len(), "looking up metadata");

        progress.start_lookups(ids.len() as u64);
        let metadata = enrich(Arc::clone(&self.catalog), ids, options, progress).await;
        progress.clear();

        metadata
    }
}
