use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8001";

/// Listener and routing settings, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Mount the dataset listing, search and discovery routes.
    pub latent_routes: bool,
    pub tls_cert_path: Option<PathBuf>,
    pub tls_key_path: Option<PathBuf>,
    /// Serve from a canned fixture instead of the remote backend.
    pub fixture_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let _ = dotenv::dotenv();
        let listen =
            dotenv::var("GAIA_LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid GAIA_LISTEN_ADDR {listen:?}"))?;
        let path = |key: &str| {
            dotenv::var(key)
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        };
        Ok(Self {
            listen_addr,
            latent_routes: dotenv::var("GAIA_LATENT_ROUTES")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            tls_cert_path: path("TLS_CERT_PATH"),
            tls_key_path: path("TLS_KEY_PATH"),
            fixture_path: path("GAIA_FIXTURE"),
        })
    }

    /// Certificate and key, only when both are configured.
    pub fn tls(&self) -> Option<(&PathBuf, &PathBuf)> {
        self.tls_cert_path.as_ref().zip(self.tls_key_path.as_ref())
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("nope"));
    }

    #[test]
    fn tls_needs_both_paths() {
        let mut cfg = ServerConfig {
            listen_addr: DEFAULT_LISTEN_ADDR.parse().unwrap(),
            latent_routes: false,
            tls_cert_path: Some("cert.pem".into()),
            tls_key_path: None,
            fixture_path: None,
        };
        assert!(cfg.tls().is_none());
        cfg.tls_key_path = Some("key.pem".into());
        assert!(cfg.tls().is_some());
    }
}
