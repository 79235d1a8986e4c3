use crate::model::Template;
use crate::store::TemplateStore;
use anyhow::{Result, anyhow};
use std::sync::Mutex;

/// Insertion-ordered in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<(String, Template)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Template>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("template store poisoned"))?;
        Ok(entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, t)| t.clone()))
    }

    fn get_all(&self) -> Result<Vec<Template>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("template store poisoned"))?;
        Ok(entries.iter().map(|(_, t)| t.clone()).collect())
    }

    fn set(&self, key: &str, template: &Template) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("template store poisoned"))?;
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = template.clone(),
            None => entries.push((key.to_string(), template.clone())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Template, WorkoutState};

    fn template(name: &str) -> Template {
        Template::from_workout(WorkoutState {
            name: name.into(),
            ..WorkoutState::default()
        })
    }

    #[test]
    fn set_is_last_writer_wins_per_key() {
        let store = MemoryStore::new();
        let first = template("Push Day");
        let second = template("Push Day");

        store.set(first.key(), &first).unwrap();
        store.set(second.key(), &second).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, second.id);
    }

    #[test]
    fn get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("nope").unwrap().is_none());
    }
}
