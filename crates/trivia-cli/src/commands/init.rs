//! The `trivia init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("trivia.toml").exists() {
        println!("trivia.toml already exists, skipping.");
    } else {
        std::fs::write("trivia.toml", SAMPLE_CONFIG)?;
        println!("Created trivia.toml");
    }

    println!("\nNext steps:");
    println!("  1. Pick a category or difficulty in trivia.toml (optional)");
    println!("  2. Run: trivia play");
    println!("  3. Run: trivia scores");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# trivia configuration

# Days a player stays remembered after submitting.
session_ttl_days = 7

# Fetch a fresh round when switching to a new player.
new_player_fetches_round = true

# What a submission without a name does: "block" or "skip_persistence".
empty_username = "block"

# Where the session cookie and score ledger are kept.
data_dir = "./trivia-data"

[source]
type = "opentdb"
base_url = "https://opentdb.com"
timeout_secs = 30

# Use the built-in question bank instead:
# [source]
# type = "mock"

[round]
amount = 10
# category = 9
# difficulty = "medium"
"#;
