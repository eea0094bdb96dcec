//! The `trivia new-player` command.

use std::path::PathBuf;

use anyhow::Result;

use trivia_core::session::SessionManager;
use trivia_providers::config::load_config_from;
use trivia_store::DataDir;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = DataDir::new(&config.data_dir).session_store();
    let mut session = SessionManager::new(Box::new(store));

    match session.current() {
        Some(name) => {
            session.clear_session();
            println!("Forgot {name}.");
        }
        None => println!("No player remembered."),
    }

    Ok(())
}
