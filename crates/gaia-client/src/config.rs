use std::fmt;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "https://helios.cohesity.com";

/// Connection settings for the remote backend, resolved once at startup.
#[derive(Clone)]
pub struct BackendConfig {
    pub host: String,
    pub api_key: String,
    /// Per-request timeout on the ask call.
    pub ask_timeout: Duration,
    /// Connect and overall timeout of the client that carries ask calls.
    pub ask_client_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: String::new(),
            ask_timeout: Duration::from_secs(60),
            ask_client_timeout: Duration::from_secs(90),
        }
    }
}

impl BackendConfig {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Reads `GAIA_HOST`, `API_KEY_HEADER`, `GAIA_ASK_TIMEOUT_SECS` and
    /// `GAIA_ASK_CLIENT_TIMEOUT_SECS`, after loading `.env` if one exists.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        let defaults = Self::default();
        let secs = |key: &str, fallback: Duration| {
            dotenv::var(key)
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };
        Self {
            host: dotenv::var("GAIA_HOST").unwrap_or(defaults.host),
            api_key: dotenv::var("API_KEY_HEADER").unwrap_or(defaults.api_key),
            ask_timeout: secs("GAIA_ASK_TIMEOUT_SECS", defaults.ask_timeout),
            ask_client_timeout: secs("GAIA_ASK_CLIENT_TIMEOUT_SECS", defaults.ask_client_timeout),
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("host", &self.host)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("ask_timeout", &self.ask_timeout)
            .field("ask_client_timeout", &self.ask_client_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_api_key() {
        let cfg = BackendConfig::new("https://gaia.internal", "s3cret");
        let s = format!("{cfg:?}");
        assert!(s.contains("gaia.internal"));
        assert!(!s.contains("s3cret"));
    }

    #[test]
    fn defaults_match_qa_timeouts() {
        let cfg = BackendConfig::default();
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.ask_timeout, Duration::from_secs(60));
        assert_eq!(cfg.ask_client_timeout, Duration::from_secs(90));
    }
}
