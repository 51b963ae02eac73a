use std::env;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_DEV_USER: &str = "user_seed_001";
pub const DEV_TOKEN_PREFIX: &str = "dev_";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Which credential the client presents, decided once at startup.
#[derive(Clone)]
pub enum AuthPolicy {
    /// A real credential from the identity provider.
    Configured(SecretString),
    /// Development only: `dev_<user id>`, accepted by the service's dev bypass.
    DevToken(String),
}

impl AuthPolicy {
    pub fn bearer_token(&self) -> String {
        match self {
            AuthPolicy::Configured(secret) => secret.expose_secret().to_string(),
            AuthPolicy::DevToken(user) => format!("{}{}", DEV_TOKEN_PREFIX, user),
        }
    }

    pub fn is_dev_token(&self) -> bool {
        matches!(self, AuthPolicy::DevToken(_))
    }
}

impl fmt::Debug for AuthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthPolicy::Configured(_) => f.write_str("Configured([REDACTED])"),
            AuthPolicy::DevToken(user) => write!(f, "DevToken({})", user),
        }
    }
}

/// Settings resolved once in `main` and passed to everything that needs them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub environment: Environment,
    pub auth: AuthPolicy,
    pub timeout_secs: u64,
}

impl Settings {
    /// Resolve settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment: Environment = get("APP_ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .try_into()?;

        let api_base_url = get("COACH_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match get("COACH_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue { name: "COACH_API_TIMEOUT_SECS", value: raw })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let auth = match get("COACH_API_TOKEN") {
            Some(token) => AuthPolicy::Configured(SecretString::new(token.into_boxed_str())),
            None if environment == Environment::Development => {
                let user = get("COACH_DEV_USER").unwrap_or_else(|| DEFAULT_DEV_USER.to_string());
                warn!(dev_user = %user, "COACH_API_TOKEN not set; using dev token");
                AuthPolicy::DevToken(user)
            }
            None => return Err(ConfigError::MissingToken(environment.as_str().to_string())),
        };

        info!(
            environment = environment.as_str(),
            api_base_url = %api_base_url,
            dev_token = auth.is_dev_token(),
            "Resolved settings"
        );

        Ok(Settings { api_base_url, environment, auth, timeout_secs })
    }

    /// Settings for a local service with the dev token. Used by tests and local runs.
    pub fn development(api_base_url: impl Into<String>) -> Self {
        Settings {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            environment: Environment::Development,
            auth: AuthPolicy::DevToken(DEFAULT_DEV_USER.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
