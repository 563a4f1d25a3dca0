#![allow(dead_code)]

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use swifty_companion::store::Credential;
use swifty_companion::Config;

pub const TOKEN_PATH: &str = "/oauth/token";

/// Configuration pointing every endpoint at a mock server.
pub fn config(server_url: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("CLIENT_ID", "uid-test".to_string()),
        ("CLIENT_SECRET", "s-test-secret".to_string()),
        ("API_BASE", format!("{}/v2", server_url)),
        ("TOKEN_URL", format!("{}{}", server_url, TOKEN_PATH)),
        ("TOKEN_STORE_PATH", "unused-in-tests.json".to_string()),
        ("HTTP_TIMEOUT_SECS", "5".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

pub fn now() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs_f64()
}

/// Credential obtained a minute ago, good for two hours.
pub fn fresh_credential(token: &str) -> Credential {
    Credential {
        access_token: token.into(),
        token_type: "bearer".into(),
        expires_in: 7200,
        scope: Some("public".into()),
        created_at: now() - 60.0,
    }
}

/// Credential that expired ten seconds ago.
pub fn expired_credential(token: &str) -> Credential {
    Credential {
        access_token: token.into(),
        token_type: "bearer".into(),
        expires_in: 7200,
        scope: Some("public".into()),
        created_at: now() - 7210.0,
    }
}

pub fn token_body(token: &str) -> String {
    serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": 7200,
        "scope": "public",
        "created_at": 1_700_000_000
    })
    .to_string()
}
