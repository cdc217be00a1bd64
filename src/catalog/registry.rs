// ABOUTME: Named registry of compound templates backed by a YAML document
// ABOUTME: Interns identical templates so each distinct template is stored and rendered once

use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::{CatalogError, Result};
use crate::template::CompoundTemplate;

/// Environment variable naming the catalog file used by [`TemplateCatalog::load`]
pub const CATALOG_ENV_VAR: &str = "CYCLESTR_CATALOG";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(default)]
    templates: IndexMap<String, CompoundTemplate>,
}

/// Compound templates keyed by name, in declaration order.
///
/// Names that share an identical template point at the same interned
/// instance.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    entries: IndexMap<String, Arc<CompoundTemplate>>,
    interned: HashSet<Arc<CompoundTemplate>>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CatalogError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse a catalog from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_yaml::from_str(content).map_err(CatalogError::YamlError)?;

        let mut catalog = Self::new();
        for (name, template) in document.templates {
            catalog.insert(name, template)?;
        }

        debug!(
            "Loaded {} templates ({} unique)",
            catalog.len(),
            catalog.unique_templates()
        );
        Ok(catalog)
    }

    /// Load a catalog from the given path or the default locations.
    ///
    /// A missing file yields an empty catalog.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let catalog_path = match path {
            Some(p) => p,
            None => Self::find_catalog_file(),
        };

        if catalog_path.exists() {
            Self::from_file(&catalog_path).with_context(|| {
                format!(
                    "Failed to load template catalog from {}",
                    catalog_path.display()
                )
            })
        } else {
            warn!(
                "Template catalog {} not found, using an empty catalog",
                catalog_path.display()
            );
            Ok(Self::new())
        }
    }

    /// Find the catalog file from the environment or the current directory
    fn find_catalog_file() -> PathBuf {
        if let Ok(path) = std::env::var(CATALOG_ENV_VAR) {
            return PathBuf::from(path);
        }

        let possible_paths = ["cyclestr.yaml", "cyclestr.yml", ".cyclestr.yaml"];
        possible_paths
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
            .unwrap_or_else(|| PathBuf::from("cyclestr.yaml"))
    }

    /// Add or replace a named template
    pub fn insert(&mut self, name: impl Into<String>, template: CompoundTemplate) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::InvalidName { name });
        }

        let shared = self.intern(template);
        if let Some(previous) = self.entries.insert(name, shared) {
            let still_used = self
                .entries
                .values()
                .any(|template| Arc::ptr_eq(template, &previous));
            if !still_used {
                self.interned.remove(&*previous);
            }
        }
        Ok(())
    }

    fn intern(&mut self, template: CompoundTemplate) -> Arc<CompoundTemplate> {
        if let Some(existing) = self.interned.get(&template) {
            debug!("Reusing interned template {}", template);
            return Arc::clone(existing);
        }

        let shared = Arc::new(template);
        self.interned.insert(Arc::clone(&shared));
        shared
    }

    pub fn get(&self, name: &str) -> Option<&Arc<CompoundTemplate>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Template names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct templates after deduplication
    pub fn unique_templates(&self) -> usize {
        self.interned.len()
    }

    /// Render a single named template
    pub fn render<Tz: TimeZone>(&self, name: &str, instant: &DateTime<Tz>) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| CatalogError::UnknownTemplate {
                name: name.to_string(),
            })?;
        Ok(template.render(instant)?)
    }

    /// Render every template, evaluating each distinct template once
    pub fn render_all<Tz: TimeZone>(
        &self,
        instant: &DateTime<Tz>,
    ) -> Result<IndexMap<String, String>> {
        let utc = instant.with_timezone(&Utc);
        let mut cache: HashMap<&CompoundTemplate, String> = HashMap::new();
        let mut rendered = IndexMap::with_capacity(self.entries.len());

        for (name, template) in &self.entries {
            let template: &CompoundTemplate = template;
            let output = match cache.get(template) {
                Some(output) => output.clone(),
                None => {
                    let output = template.render(&utc)?;
                    cache.insert(template, output.clone());
                    output
                }
            };
            rendered.insert(name.clone(), output);
        }

        debug!(
            "Rendered {} templates at {} ({} evaluated)",
            rendered.len(),
            utc,
            cache.len()
        );
        Ok(rendered)
    }
}
