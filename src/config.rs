// Runtime configuration. Secrets come from the environment (optionally
// seeded from a `.env` file in the working directory); everything else has
// a default pointing at the production 42 API.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.intra.42.fr/v2";
pub const DEFAULT_TOKEN_URL: &str = "https://api.intra.42.fr/oauth/token";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TOKEN_STORE_FILE: &str = "token_store.json";

#[derive(Clone, Debug)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub api_base: String,
    pub token_url: String,
    pub token_store_path: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Load `.env` (if any) and read the configuration from the process
    /// environment. Fails when `CLIENT_ID` or `CLIENT_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("ignoring unreadable .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let client_id = var("CLIENT_ID");
        let client_secret = var("CLIENT_SECRET");
        let (client_id, client_secret) = match (client_id, client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            (id, secret) => {
                let missing: Vec<&str> = [
                    ("CLIENT_ID", id.is_none()),
                    ("CLIENT_SECRET", secret.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| name)
                .collect();
                return Err(Error::Config(format!(
                    "missing required environment variables: {}. \
                     Create a .env file with CLIENT_ID and CLIENT_SECRET",
                    missing.join(", ")
                )));
            }
        };

        let api_base = var("API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.into())
            .trim_end_matches('/')
            .to_string();
        let token_url = var("TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.into());
        let token_store_path = var("TOKEN_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_token_store_path);

        let timeout_secs = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "HTTP_TIMEOUT_SECS must be a number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            client_id,
            client_secret,
            api_base,
            token_url,
            token_store_path,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// `<data dir>/swifty-companion/token_store.json`, or `./token_store.json`
/// when the platform has no data directory.
fn default_token_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("swifty-companion").join(TOKEN_STORE_FILE))
        .unwrap_or_else(|| PathBuf::from(TOKEN_STORE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secrets_are_set() {
        let vars = [("CLIENT_ID", "uid"), ("CLIENT_SECRET", "secret")];
        let cfg = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(cfg.client_id, "uid");
        assert_eq!(cfg.client_secret, "secret");
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(cfg.token_store_path.ends_with(TOKEN_STORE_FILE));
    }

    #[test]
    fn missing_secret_fails_fast() {
        let err = Config::from_lookup(lookup(&[("CLIENT_ID", "uid")])).unwrap_err();
        match err {
            Error::Config(msg) => {
                assert!(msg.contains("CLIENT_SECRET"));
                assert!(!msg.contains("CLIENT_ID,"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let vars = [("CLIENT_ID", "  "), ("CLIENT_SECRET", "")];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("CLIENT_ID, CLIENT_SECRET"), "{msg}");
    }

    #[test]
    fn overrides_are_honoured() {
        let cfg = Config::from_lookup(lookup(&[
            ("CLIENT_ID", "uid"),
            ("CLIENT_SECRET", "secret"),
            ("API_BASE", "http://127.0.0.1:9999/v2/"),
            ("TOKEN_URL", "http://127.0.0.1:9999/oauth/token"),
            ("TOKEN_STORE_PATH", "/tmp/tokens.json"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_base, "http://127.0.0.1:9999/v2");
        assert_eq!(cfg.token_url, "http://127.0.0.1:9999/oauth/token");
        assert_eq!(cfg.token_store_path, PathBuf::from("/tmp/tokens.json"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("CLIENT_ID", "uid"),
            ("CLIENT_SECRET", "secret"),
            ("HTTP_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
