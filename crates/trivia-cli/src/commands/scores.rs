//! The `trivia scores` command.

use std::path::PathBuf;

use anyhow::Result;

use trivia_core::traits::LedgerStore;
use trivia_providers::config::load_config_from;
use trivia_store::DataDir;

use super::ledger_table;

pub fn execute(format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let entries = DataDir::new(&config.data_dir).ledger_store().read();

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&entries)?),
        "table" => {
            if entries.is_empty() {
                println!("No scores yet.");
            } else {
                println!("{}", ledger_table(&entries));
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }

    Ok(())
}
