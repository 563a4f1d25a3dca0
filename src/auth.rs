// Client-credentials token manager: hands out a cached access token while it
// is still valid and fetches (and persists) a new one otherwise.
//
// There is no locking around refresh. Two callers racing at expiry may both
// fetch; each token is valid and the store keeps whichever was written last.

use crate::error::{Error, Result};
use crate::store::{Credential, TokenStore};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Body of a successful token endpoint response. Any `created_at` the server
/// sends is ignored; the local clock stamps the credential instead.
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in: u64,
    #[serde(default)]
    scope: Option<String>,
}

/// Hands out client-credentials access tokens, caching the current one in
/// the token store `S`.
pub struct TokenManager<S> {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    store: S,
}

impl<S: TokenStore> TokenManager<S> {
    /// Build a manager that requests tokens from `token_url` with the given
    /// application credentials and keeps them in `store`.
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        store: S,
    ) -> Self {
        TokenManager {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            store,
        }
    }

    /// Return a valid access token, hitting the network only when the stored
    /// credential is missing or expired.
    pub fn get_valid_token(&self) -> Result<String> {
        if let Some(credential) = self.store.get()? {
            if credential.is_valid_at(now()) {
                log::debug!("using cached access token");
                return Ok(credential.access_token);
            }
            log::debug!("cached access token expired");
        }
        self.fetch_new_token()
    }

    /// Request a new token from the authorization server and overwrite the
    /// stored credential with it. Nothing is stored on failure.
    pub fn fetch_new_token(&self) -> Result<String> {
        log::info!("requesting a new access token from {}", self.token_url);
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let res = self.client.post(&self.token_url).form(&form).send()?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            log::warn!("token request rejected with {}", status);
            return Err(Error::Auth { status, body });
        }

        let token: TokenResponse = res.json()?;
        let credential = Credential {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            scope: token.scope,
            created_at: now(),
        };
        self.store.put(&credential)?;
        log::debug!("stored new access token, valid for {}s", credential.expires_in);
        Ok(credential.access_token)
    }
}

fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
