use crate::{ConfigError, Environment, FromEnv};
use std::env;

/// Allowed browser origins, read from `CORS_ALLOWED_ORIGIN`.
///
/// An empty list means "any origin", which is only accepted outside production.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.is_empty()
    }

    fn parse(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl FromEnv for CorsConfig {
    /// Comma-separated list, e.g. `http://localhost:3000,https://app.example.com`.
    /// Required when `APP_ENV=production`.
    fn from_env() -> Result<Self, ConfigError> {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGIN")
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default();

        if allowed_origins.is_empty() && Environment::from_env().is_production() {
            return Err(ConfigError::MissingEnvVar("CORS_ALLOWED_ORIGIN".to_string()));
        }

        Ok(Self { allowed_origins })
    }
}
