//! Local storage capability for templates.
//!
//! The store is an opaque key-value surface keyed by template name;
//! writes are last-writer-wins per key. [`MemoryStore`] backs tests and
//! ephemeral sessions, [`JsonFileStore`] persists a single JSON document.

mod file;
mod memory;

use crate::model::Template;
use anyhow::Result;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

pub trait TemplateStore {
    fn get(&self, key: &str) -> Result<Option<Template>>;
    fn get_all(&self) -> Result<Vec<Template>>;
    fn set(&self, key: &str, template: &Template) -> Result<()>;
}
