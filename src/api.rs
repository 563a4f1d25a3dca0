// API client module: a small blocking HTTP client for the 42 users API.
// Every call is synchronous; the UI decides which thread runs it.

use crate::auth::TokenManager;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::{JsonFileStore, TokenStore};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Full user record as returned by `GET /users/{id}`. The core passes it
/// through untouched; `profile::ProfileView` picks out the displayed fields.
pub type UserProfile = serde_json::Value;

/// Entry of the `/users/?filter[login]=` search result. Only the id is used.
#[derive(Deserialize, Debug)]
struct UserSummary {
    id: u64,
}

/// Resolves logins to user records, authenticating through a
/// `TokenManager` backed by the token store `S`.
pub struct ApiClient<S = JsonFileStore> {
    client: Client,
    base_url: String,
    tokens: TokenManager<S>,
}

impl ApiClient<JsonFileStore> {
    /// Build a client that persists its token at `config.token_store_path`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = JsonFileStore::new(config.token_store_path.clone());
        Self::with_store(config, store)
    }
}

impl<S: TokenStore> ApiClient<S> {
    /// Build a client from `config` that keeps its access token in `store`
    /// instead of the file named by `config.token_store_path`.
    pub fn with_store(config: &Config, store: S) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let tokens = TokenManager::new(
            client.clone(),
            config.token_url.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
            store,
        );
        Ok(ApiClient {
            client,
            base_url: config.api_base.clone(),
            tokens,
        })
    }

    /// Look up `login` and return the full user record.
    ///
    /// Two requests: a filtered search to find the user id, then a fetch of
    /// that id. Nothing is cached, so repeated lookups always hit the API.
    pub fn resolve_user(&self, login: &str) -> Result<UserProfile> {
        let token = self.tokens.get_valid_token()?;

        let url = format!("{}/users/", self.base_url);
        log::debug!("searching users with login {:?}", login);
        let res = self
            .client
            .get(&url)
            .query(&[("filter[login]", login)])
            .bearer_auth(&token)
            .send()?;
        let matches: Vec<UserSummary> = parse_success(res)?;
        let first = matches.first().ok_or_else(|| Error::NotFound(login.to_string()))?;

        let url = format!("{}/users/{}", self.base_url, first.id);
        log::debug!("fetching user {}", first.id);
        let res = self.client.get(&url).bearer_auth(&token).send()?;
        parse_success(res)
    }
}

/// Decode a 2xx JSON body, or turn anything else into `Error::Api` carrying
/// the status and the raw body.
fn parse_success<T: DeserializeOwned>(res: Response) -> Result<T> {
    if !res.status().is_success() {
        let status = res.status();
        log::warn!("{} answered {}", res.url().path(), status);
        let body = res.text().unwrap_or_default();
        return Err(Error::Api { status, body });
    }
    Ok(res.json()?)
}
