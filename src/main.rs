// Entrypoint for the CLI application.
// - Keeps `main` small: load configuration, build the API client and hand
//   it to the UI loop.
// - Missing CLIENT_ID / CLIENT_SECRET aborts here, before any prompt.

use swifty_companion::{ui::main_menu, ApiClient, Config};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    log::debug!("token store at {}", config.token_store_path.display());
    let api = ApiClient::from_config(&config)?;

    main_menu(&api)?;
    Ok(())
}
