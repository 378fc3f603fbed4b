//! Template catalog
//!
//! Stands in for the host's template-lookup call. Catalog files are JSON
//! documents of the form `{"businessId": "...", "templates": [...]}`; a
//! catalog path may be a single file or a directory of `*.json` files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::template::model::{lenient_vec, Template};

/// One catalog document: the templates of a single business
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    /// Business the templates belong to
    pub business_id: String,
    /// Templates available to that business; non-object entries are dropped
    #[serde(default, deserialize_with = "lenient_vec")]
    pub templates: Vec<Template>,
}

/// Templates keyed by business identity and name
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    entries: Vec<CatalogFile>,
}

impl TemplateCatalog {
    /// Build a catalog from already-parsed documents
    #[must_use]
    pub const fn from_files(entries: Vec<CatalogFile>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON file or a directory of JSON files.
    ///
    /// Directory entries are read in file-name order; files without a
    /// `.json` extension are skipped.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to access catalog: {}", path.display()))?;

        let files = if metadata.is_dir() {
            json_files_in(path).await?
        } else {
            vec![path.to_path_buf()]
        };

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            entries.push(read_catalog_file(&file).await?);
        }

        Ok(Self { entries })
    }

    /// Find a template by business and name.
    ///
    /// A miss means "no template selected".
    #[must_use]
    pub fn lookup(&self, business_id: &str, name: &str) -> Option<&Template> {
        self.entries
            .iter()
            .filter(|entry| entry.business_id == business_id)
            .flat_map(|entry| entry.templates.iter())
            .find(|template| template.name == name)
    }

    /// Names of all templates for a business, in catalog order
    #[must_use]
    pub fn template_names(&self, business_id: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.business_id == business_id)
            .flat_map(|entry| entry.templates.iter())
            .map(|template| template.name.as_str())
            .collect()
    }
}

async fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut reader = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read catalog directory: {}", dir.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .with_context(|| format!("Failed to list catalog directory: {}", dir.display()))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

async fn read_catalog_file(path: &Path) -> Result<CatalogFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
}
