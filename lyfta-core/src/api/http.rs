use crate::api::{RemoteApi, TokenProvider};
use crate::model::{Template, WorkoutState};
use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;

/// Bound on every request; expiry counts as a remote failure and triggers
/// the caller's local-only fallback.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// reqwest-backed implementation of [`RemoteApi`].
#[derive(Debug, Clone)]
pub struct HttpApi<T: TokenProvider> {
    client: Client,
    base_url: String,
    tokens: T,
}

impl<T: TokenProvider> HttpApi<T> {
    pub fn new(base_url: impl Into<String>, tokens: T) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.tokens.token() {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn post_workout(&self, path: &str, workout: &WorkoutState) -> Result<Template> {
        let response = self
            .request(Method::POST, path)
            .json(workout)
            .send()
            .await
            .with_context(|| format!("POST {path} failed"))?
            .error_for_status()
            .with_context(|| format!("POST {path} rejected"))?;
        response
            .json()
            .await
            .with_context(|| format!("POST {path} returned a malformed template"))
    }

    async fn get_json<D: serde::de::DeserializeOwned>(&self, path: &str) -> Result<D> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {path} rejected"))?;
        response
            .json()
            .await
            .with_context(|| format!("GET {path} returned malformed JSON"))
    }
}

impl<T: TokenProvider> RemoteApi for HttpApi<T> {
    async fn create_template(&self, workout: &WorkoutState) -> Result<Template> {
        self.post_workout("/template", workout).await
    }

    async fn fetch_template(&self, id: &str) -> Result<Template> {
        self.get_json(&format!("/template/{id}")).await
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        self.get_json("/templates").await
    }

    async fn record_session(&self, workout: &WorkoutState) -> Result<Template> {
        self.post_workout("/workouts", workout).await
    }

    async fn list_sessions(&self) -> Result<Vec<Template>> {
        self.get_json("/workouts").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StaticToken;

    #[test]
    fn trailing_slash_is_normalized() {
        let api = HttpApi::new("http://localhost:8000/", StaticToken(None)).unwrap();
        assert_eq!(api.base_url, "http://localhost:8000");
    }
}
