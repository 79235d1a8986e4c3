use crate::api::RemoteApi;
use crate::model::{Template, WorkoutState};
use crate::store::TemplateStore;
use anyhow::{Context, Result};
use log::warn;

/// Result of a save under the local-commit-always, remote-best-effort
/// durability policy.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Local and remote both committed; carries the server-assigned template.
    Synced(Template),
    /// Local write stands, remote leg failed. Surfaced to the user as a
    /// non-blocking notice, never as an error.
    LocalOnly { template: Template, warning: String },
}

impl SaveOutcome {
    pub fn template(&self) -> &Template {
        match self {
            SaveOutcome::Synced(template) => template,
            SaveOutcome::LocalOnly { template, .. } => template,
        }
    }
}

/// Persist the current builder state.
///
/// The local write happens first and unconditionally, so an offline or
/// crashed remote leg never loses the workout. `save_as_template` selects
/// the remote endpoint: template creation vs. session recording.
pub async fn save_workout<S, A>(state: &WorkoutState, store: &S, api: &A) -> Result<SaveOutcome>
where
    S: TemplateStore,
    A: RemoteApi,
{
    let template = Template::from_workout(state.clone());
    store
        .set(template.key(), &template)
        .context("local save failed")?;

    let remote = if state.save_as_template {
        api.create_template(state).await
    } else {
        api.record_session(state).await
    };

    match remote {
        Ok(synced) => {
            // Replace the local copy with the server-assigned one; losing
            // this write only costs the server id, not the workout.
            if let Err(e) = store.set(synced.key(), &synced) {
                warn!("could not update local copy after sync: {e:#}");
            }
            Ok(SaveOutcome::Synced(synced))
        }
        Err(e) => {
            let warning = format!("stored locally only: {e:#}");
            warn!("remote save failed, {warning}");
            Ok(SaveOutcome::LocalOnly { template, warning })
        }
    }
}
