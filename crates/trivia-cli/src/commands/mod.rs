pub mod init;
pub mod new_player;
pub mod page;
pub mod play;
pub mod scores;
pub mod whoami;

use comfy_table::{Cell, Table};

use trivia_core::model::ScoreEntry;

/// The ledger as a numbered player/score table, oldest entry first.
pub fn ledger_table(entries: &[ScoreEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Player", "Score"]);
    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.username),
            Cell::new(entry.score),
        ]);
    }
    table
}
