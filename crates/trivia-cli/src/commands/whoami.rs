//! The `trivia whoami` command.

use std::path::PathBuf;

use anyhow::Result;

use trivia_providers::config::load_config_from;
use trivia_store::DataDir;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    match DataDir::new(&config.data_dir).session_store().cookie() {
        Some(cookie) => println!(
            "{} (remembered until {})",
            cookie.value,
            cookie.expires.format("%Y-%m-%d %H:%M UTC")
        ),
        None => println!("No player remembered."),
    }

    Ok(())
}
