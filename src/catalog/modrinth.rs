//! Modrinth catalog lookup
//!
//! API endpoint: https://api.modrinth.com/v2/project/{id}

use crate::catalog::{CatalogLookup, HttpClient};
use crate::domain::ComponentMetadata;
use crate::error::CatalogError;
use async_trait::async_trait;
use serde::Deserialize;

/// Modrinth API base URL
pub const MODRINTH_API_URL: &str = "https://api.modrinth.com/v2";

/// Modrinth project lookup
pub struct ModrinthCatalog {
    client: HttpClient,
    base_url: String,
}

/// Fields of a Modrinth project response we display
#[derive(Debug, Deserialize)]
struct ProjectResponse {
    title: String,
    #[serde(default)]
    description: String,
}

impl ModrinthCatalog {
    /// Create a catalog pointing at the public API
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, MODRINTH_API_URL)
    }

    /// Create a catalog pointing at a custom API root
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a project, or `None` if the id cannot be a slug
    fn build_url(&self, id: &str) -> Option<String> {
        let usable = !id.is_empty()
            && !id
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'));
        usable.then(|| format!("{}/project/{}", self.base_url, id))
    }
}

#[async_trait]
impl CatalogLookup for ModrinthCatalog {
    fn name(&self) -> &'static str {
        "Modrinth"
    }

    async fn lookup(&self, id: &str) -> Result<Option<ComponentMetadata>, CatalogError> {
        let Some(url) = self.build_url(id) else {
            return Ok(None);
        };

        let project: Option<ProjectResponse> =
            self.client.get_json(&url, id, self.name()).await?;

        Ok(project.map(|p| ComponentMetadata::new(p.title, p.description, self.name())))
    }
}
