//! The `trivia page` command.

use std::path::PathBuf;

use anyhow::Result;

use trivia_core::game::Game;
use trivia_providers::config::{create_source, load_config_from};
use trivia_report::{write_html_page, HtmlPage};
use trivia_store::DataDir;

pub async fn execute(output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = create_source(&config.source)?;
    let data_dir = DataDir::new(&config.data_dir);

    let mut game = Game::new(
        source,
        Box::new(data_dir.session_store()),
        Box::new(data_dir.ledger_store()),
        HtmlPage::new(),
        config.game_config(),
    );
    game.start().await;

    let page = game.into_renderer();
    write_html_page(page.state(), &output)?;
    println!(
        "Wrote {} question(s) to {}",
        page.state().question_count(),
        output.display()
    );

    Ok(())
}
