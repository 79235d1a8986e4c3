//! Template reconciliation: one deduplicated, display-ordered list out of
//! the local cache and the remote listing.

use crate::api::RemoteApi;
use crate::model::Template;
use crate::store::TemplateStore;
use log::warn;
use std::collections::HashSet;

/// Merge the two listings, remote first.
///
/// The first occurrence of each name wins, so a locally cached copy of a
/// template that also exists remotely is suppressed in favor of the remote
/// one. Dedupe is by name, not id: templates created offline have no
/// server id yet, and name matching is what keeps them from showing up
/// twice after their first sync. Two distinct templates that share a name
/// collapse to one entry; that is a known, accepted limitation.
pub fn reconcile(local: Vec<Template>, remote: Vec<Template>) -> Vec<Template> {
    let mut seen = HashSet::new();
    remote
        .into_iter()
        .chain(local)
        .filter(|t| seen.insert(t.workout.name.clone()))
        .collect()
}

/// Home-screen feed of templates.
///
/// The page renders [`cached`](TemplateCatalog::cached) immediately, then
/// swaps in the result of [`refresh`](TemplateCatalog::refresh) once the
/// network answers. Either source may fail independently; whichever
/// succeeded is rendered.
pub struct TemplateCatalog<S, A> {
    store: S,
    api: A,
}

impl<S, A> TemplateCatalog<S, A>
where
    S: TemplateStore,
    A: RemoteApi,
{
    pub fn new(store: S, api: A) -> Self {
        Self { store, api }
    }

    /// Local snapshot for immediate rendering. A failed read degrades to
    /// an empty list with a logged warning.
    pub fn cached(&self) -> Vec<Template> {
        match self.store.get_all() {
            Ok(templates) => templates,
            Err(e) => {
                warn!("could not read local templates: {e:#}");
                Vec::new()
            }
        }
    }

    /// Fetch the online listing and merge it over the local snapshot. A
    /// failed fetch degrades to local-only with a logged warning.
    pub async fn refresh(&self) -> Vec<Template> {
        let local = self.cached();
        let remote = match self.api.list_templates().await {
            Ok(templates) => templates,
            Err(e) => {
                warn!("could not load online templates: {e:#}");
                Vec::new()
            }
        };
        reconcile(local, remote)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Template, WorkoutState};
    use crate::store::MemoryStore;
    use anyhow::{Result, anyhow};

    fn template(id: &str, name: &str) -> Template {
        let mut template = Template::from_workout(WorkoutState {
            name: name.into(),
            ..WorkoutState::default()
        });
        template.id = id.into();
        template
    }

    #[test]
    fn dedupes_by_name_with_remote_priority() {
        let local = vec![template("local1", "Push Day")];
        let remote = vec![
            template("remote1", "Push Day"),
            template("remote2", "Pull Day"),
        ];

        let merged = reconcile(local, remote);

        let ids: Vec<_> = merged.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["remote1", "remote2"]);
    }

    #[test]
    fn unseen_local_entries_keep_their_relative_order() {
        let local = vec![template("a", "A"), template("b", "B")];
        let remote = vec![template("c", "C"), template("a2", "A")];

        let merged = reconcile(local, remote);

        let names: Vec<_> = merged.iter().map(|t| t.workout.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
        assert_eq!(merged[1].id, "a2");
    }

    struct ListApi {
        templates: Result<Vec<Template>, String>,
    }

    impl RemoteApi for ListApi {
        async fn create_template(&self, _: &WorkoutState) -> Result<Template> {
            Err(anyhow!("not used"))
        }

        async fn fetch_template(&self, _: &str) -> Result<Template> {
            Err(anyhow!("not used"))
        }

        async fn list_templates(&self) -> Result<Vec<Template>> {
            self.templates.clone().map_err(|e| anyhow!(e))
        }

        async fn record_session(&self, _: &WorkoutState) -> Result<Template> {
            Err(anyhow!("not used"))
        }

        async fn list_sessions(&self) -> Result<Vec<Template>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn refresh_merges_remote_over_cached() {
        use crate::store::TemplateStore;

        let store = MemoryStore::new();
        let cached = template("local1", "Push Day");
        store.set(cached.key(), &cached).unwrap();

        let api = ListApi {
            templates: Ok(vec![
                template("remote1", "Push Day"),
                template("remote2", "Pull Day"),
            ]),
        };
        let catalog = TemplateCatalog::new(store, api);

        let merged = catalog.refresh().await;
        let ids: Vec<_> = merged.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["remote1", "remote2"]);
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_local() {
        use crate::store::TemplateStore;

        let store = MemoryStore::new();
        let cached = template("local1", "Push Day");
        store.set(cached.key(), &cached).unwrap();

        let api = ListApi {
            templates: Err("timed out".into()),
        };
        let catalog = TemplateCatalog::new(store, api);

        let merged = catalog.refresh().await;
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "local1");
    }
}
