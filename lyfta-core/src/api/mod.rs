//! Remote API capability.
//!
//! The backend is an opaque HTTP/JSON surface; the core only depends on
//! the [`RemoteApi`] trait so that the save flow and the template catalog
//! can be driven by stubs in tests. [`HttpApi`] is the real client.

mod http;
mod token;

use crate::model::{Template, WorkoutState};
use anyhow::Result;

pub use http::HttpApi;
pub use token::{EnvTokenProvider, StaticToken, TokenProvider};

#[allow(async_fn_in_trait)]
pub trait RemoteApi {
    /// `POST /template` — persist a reusable template; returns the stored
    /// template with its server-assigned id.
    async fn create_template(&self, workout: &WorkoutState) -> Result<Template>;

    /// `GET /template/:id` — fetch one template for hydration.
    async fn fetch_template(&self, id: &str) -> Result<Template>;

    /// `GET /templates` — the online-templates listing the reconciliation
    /// service merges against the local cache.
    async fn list_templates(&self) -> Result<Vec<Template>>;

    /// `POST /workouts` — record a completed session (same shape as a
    /// workout state, elapsed timer included).
    async fn record_session(&self, workout: &WorkoutState) -> Result<Template>;

    /// `GET /workouts` — session history.
    async fn list_sessions(&self) -> Result<Vec<Template>>;
}
