// Library root
// -----------
// Core of the companion app: everything the terminal UI needs to turn a
// login into a displayable profile.
//
// Module responsibilities:
// - `config`: environment / `.env` configuration, fails fast on missing
//   client credentials.
// - `store`: persistence of the single cached access token.
// - `auth`: client-credentials token manager on top of the store.
// - `api`: login -> user record resolution (search, then fetch by id).
// - `profile`: typed view of the fields the profile screen shows.
// - `ui`: interactive terminal flows; delegates all requests to `api`.
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod profile;
pub mod store;
pub mod ui;

pub use api::{ApiClient, UserProfile};
pub use config::Config;
pub use error::{Error, Result};
