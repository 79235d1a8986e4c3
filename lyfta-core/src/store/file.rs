use crate::model::Template;
use crate::store::TemplateStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Template store backed by one JSON document on disk.
///
/// The whole document is read and rewritten per operation; at this data
/// volume (a handful of templates) that keeps the format debuggable and
/// the writes last-writer-wins per key. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Template>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("corrupt template store at {}", self.path.display()))
    }

    fn persist(&self, entries: &[Template]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

impl TemplateStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Template>> {
        Ok(self.load()?.into_iter().find(|t| t.key() == key))
    }

    fn get_all(&self) -> Result<Vec<Template>> {
        self.load()
    }

    fn set(&self, key: &str, template: &Template) -> Result<()> {
        let mut entries = self.load()?;
        match entries.iter_mut().find(|t| t.key() == key) {
            Some(existing) => *existing = template.clone(),
            None => entries.push(template.clone()),
        }
        self.persist(&entries)
    }
}
