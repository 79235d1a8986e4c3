/// Source of the bearer token attached to API requests.
///
/// Absence of a token is non-fatal; requests proceed unauthenticated and
/// the backend decides what an anonymous caller may see.
pub trait TokenProvider {
    fn token(&self) -> Option<String>;
}

/// Reads the token from the `LYFTA_API_TOKEN` environment variable.
#[derive(Debug, Clone, Default)]
pub struct EnvTokenProvider;

impl TokenProvider for EnvTokenProvider {
    fn token(&self) -> Option<String> {
        std::env::var("LYFTA_API_TOKEN").ok()
    }
}

/// Fixed token (or none), mainly for tests.
#[derive(Debug, Clone)]
pub struct StaticToken(pub Option<String>);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
