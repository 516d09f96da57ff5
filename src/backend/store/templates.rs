/**
 * Quick-Reply Templates Store
 *
 * Templates are canned snippets grouped by category that the UI offers for
 * one-click posting. The whole document lives in one JSON file and, like the
 * note log, every update is a mutex-guarded load-modify-save.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::backend::store::error::StoreError;
use crate::backend::store::file::{read_json, write_json_atomic, Loaded};

/// Title used when a template is added without one
pub const UNTITLED: &str = "Untitled";

/// One canned snippet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Template {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// A named group of templates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Category {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub templates: Vec<Template>,
}

/// The templates document, keyed by category slug
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TemplatesConfig {
    #[serde(default)]
    pub categories: BTreeMap<String, Category>,
}

impl TemplatesConfig {
    /// Document written when no templates file exists
    pub fn starter() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            "home".to_string(),
            Category {
                icon: "🏠".to_string(),
                name: "Shared text".to_string(),
                templates: vec![
                    Template {
                        title: "Welcome".to_string(),
                        content: "Welcome to LanShare! Post text here and every device on the network sees it instantly.".to_string(),
                    },
                    Template {
                        title: "Tip".to_string(),
                        content: "Press Enter on a desktop keyboard to post quickly; all devices stay in sync.".to_string(),
                    },
                ],
            },
        );
        for (key, icon, name) in [
            ("presale", "💬", "Pre-sale"),
            ("express", "📦", "Shipping"),
            ("aftersale", "🛠️", "After-sale"),
            ("purchase", "🛒", "Purchase links"),
            ("repair", "🔧", "Repairs"),
            ("settings", "⚙️", "Settings"),
        ] {
            categories.insert(
                key.to_string(),
                Category {
                    icon: icon.to_string(),
                    name: name.to_string(),
                    templates: Vec::new(),
                },
            );
        }
        Self { categories }
    }
}

/// Outcome of [`TemplateStore::add_to_category`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

/// Errors specific to template edits
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("category '{0}' does not exist")]
    UnknownCategory(String),
    #[error("template content must not be empty")]
    EmptyContent,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// File-backed templates document
#[derive(Debug)]
pub struct TemplateStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the starter document if no file exists yet
    ///
    /// Returns `true` when a file was created.
    pub async fn ensure_default(&self) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?
        {
            return Ok(false);
        }
        tracing::warn!(
            "[Templates] {} not found, writing starter templates",
            self.path.display()
        );
        write_json_atomic(&self.path, &TemplatesConfig::starter()).await?;
        Ok(true)
    }

    /// Load the document; missing or corrupt files read as empty
    pub async fn load(&self) -> Result<TemplatesConfig, StoreError> {
        match read_json::<TemplatesConfig>(&self.path).await? {
            Loaded::Present(config) => Ok(config),
            Loaded::Missing => {
                tracing::warn!("[Templates] {} does not exist", self.path.display());
                Ok(TemplatesConfig::default())
            }
            Loaded::Corrupt(message) => {
                tracing::error!("[Templates] {} is malformed: {}", self.path.display(), message);
                Ok(TemplatesConfig::default())
            }
        }
    }

    /// Replace the whole document
    pub async fn replace(&self, config: &TemplatesConfig) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        write_json_atomic(&self.path, config).await
    }

    /// Append a template to an existing category
    ///
    /// Content is trimmed and compared against the trimmed content of every
    /// template already in the category; a match is reported as
    /// `Duplicate` and nothing is written. A blank title becomes
    /// [`UNTITLED`].
    pub async fn add_to_category(
        &self,
        key: &str,
        template: Template,
    ) -> Result<AddOutcome, TemplateError> {
        let content = template.content.trim();
        if content.is_empty() {
            return Err(TemplateError::EmptyContent);
        }
        let title = match template.title.trim() {
            "" => UNTITLED,
            title => title,
        };

        let _guard = self.write_lock.lock().await;
        let mut config = self.load().await?;
        let category = config
            .categories
            .get_mut(key)
            .ok_or_else(|| TemplateError::UnknownCategory(key.to_string()))?;

        if category
            .templates
            .iter()
            .any(|existing| existing.content.trim() == content)
        {
            return Ok(AddOutcome::Duplicate);
        }

        category.templates.push(Template {
            title: title.to_string(),
            content: content.to_string(),
        });
        write_json_atomic(&self.path, &config).await?;
        tracing::info!("[Templates] Added template '{}' to {}", title, key);
        Ok(AddOutcome::Added)
    }
}
