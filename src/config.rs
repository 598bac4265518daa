use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;
const DEFAULT_TOKEN_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PREDICTION_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing API configuration. Check your .env file.")]
    MissingApi,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub deployment_url: String,
    pub token_url: String,
    pub port: u16,
    pub session_ttl_minutes: i64,
    pub token_timeout: Duration,
    pub prediction_timeout: Duration,
}

impl Settings {
    /// Reads settings from the process environment, after loading `.env` if
    /// one exists. Variables already set take precedence over the file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let (Some(api_key), Some(deployment_url)) = (non_empty("API_KEY"), non_empty("DEPLOYMENT_URL")) else {
            return Err(ConfigError::MissingApi);
        };

        let token_url = non_empty("IAM_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let session_ttl_minutes = lookup("SESSION_TTL_MINUTES")
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);
        let seconds = |key: &str, default: u64| {
            let secs = lookup(key)
                .and_then(|value| value.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(default);
            Duration::from_secs(secs)
        };

        Ok(Self {
            api_key,
            deployment_url,
            token_url,
            port,
            session_ttl_minutes,
            token_timeout: seconds("TOKEN_TIMEOUT_SECS", DEFAULT_TOKEN_TIMEOUT_SECS),
            prediction_timeout: seconds("PREDICTION_TIMEOUT_SECS", DEFAULT_PREDICTION_TIMEOUT_SECS),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
