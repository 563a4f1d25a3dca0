// UI layer: a terminal stand-in for the search and profile screens, built on
// `dialoguer` prompts and an `indicatif` spinner. All network work goes
// through `ApiClient::resolve_user`.

use crate::api::{ApiClient, UserProfile};
use crate::profile::{ProfileView, Row, Section};
use crate::store::TokenStore;
use anyhow::{Context, Result};
use crossterm::style::{style, Stylize};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Main interactive menu. Runs a select loop until the user picks "Exit".
pub fn main_menu<S: TokenStore>(api: &ApiClient<S>) -> Result<()> {
    println!("{}", style("42 Swifty Companion").bold());
    loop {
        let items = ["Search login", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_search(api)?,
            _ => break,
        }
    }
    Ok(())
}

/// Search screen: read a login, look it up, then show the profile or the
/// error message.
fn handle_search<S: TokenStore>(api: &ApiClient<S>) -> Result<()> {
    let input: String = Input::new()
        .with_prompt("Enter login name")
        .allow_empty(true)
        .interact_text()?;
    let login = input.trim();
    if login.is_empty() {
        println!("{}", style("Please enter a login name").red());
        return Ok(());
    }

    match fetch_with_spinner(api, login) {
        Ok(profile) => show_profile(&profile),
        Err(e) => {
            log::debug!("lookup of {:?} failed: {:?}", login, e);
            println!("{}", style(format!("Error: {}", e)).red());
        }
    }
    Ok(())
}

/// Run the lookup on a worker thread and hand the result back over a
/// channel, keeping the spinner animated in the meantime.
fn fetch_with_spinner<S: TokenStore>(api: &ApiClient<S>, login: &str) -> Result<UserProfile> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let (tx, rx) = mpsc::channel();
    let result = thread::scope(|scope| {
        scope.spawn(move || {
            let _ = tx.send(api.resolve_user(login));
        });
        rx.recv()
    });
    spinner.finish_and_clear();

    let profile = result.context("lookup worker stopped before answering")??;
    Ok(profile)
}

/// Profile screen: print the record section by section.
fn show_profile(profile: &UserProfile) {
    let view = match ProfileView::from_value(profile) {
        Ok(v) => v,
        Err(e) => {
            println!("{}", style(format!("Error: unexpected profile format: {}", e)).red());
            return;
        }
    };

    println!();
    if let Some(link) = view.image_link() {
        println!("{} {}", style("Avatar:").dim(), link);
    }
    for section in view.sections() {
        print_section(&section);
    }
    println!();
}

fn print_section(section: &Section) {
    println!("\n{}", style(&section.title).bold().underlined());
    for row in &section.rows {
        match row {
            Row::Field { label, value } => println!("{:>20}: {}", label, value),
            Row::Project { text, validated: true } => println!("  {}", style(text).green()),
            Row::Project { text, validated: false } => println!("  {}", style(text).red()),
            Row::Note(note) => println!("  {}", note),
        }
    }
}
