//! The `trivia play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use trivia_core::error::GameError;
use trivia_core::game::Game;
use trivia_core::memory::{MemoryLedgerStore, MemorySessionStore};
use trivia_core::model::{Round, ScoreEntry, Visibility};
use trivia_core::traits::{LedgerStore, Renderer, SessionStore};
use trivia_providers::config::{create_source, load_config_from};
use trivia_store::DataDir;

use super::ledger_table;

/// Prints view updates to stdout as they happen.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    name_field: String,
    name_field_visible: bool,
}

impl TerminalRenderer {
    /// The prefilled name, if the name field is hidden behind a session.
    fn remembered_name(&self) -> Option<&str> {
        (!self.name_field_visible && !self.name_field.is_empty()).then_some(self.name_field.as_str())
    }
}

impl Renderer for TerminalRenderer {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            println!("Loading questions...");
        }
    }

    fn render_round(&mut self, round: &Round) {
        if round.is_empty() {
            println!("No questions available.");
            return;
        }
        for question in &round.questions {
            println!();
            println!("{}. {}", question.index + 1, question.prompt);
            for (i, choice) in question.choices.iter().enumerate() {
                println!("   {}) {}", i + 1, choice.text());
            }
        }
        println!();
    }

    fn clear_round(&mut self) {
        println!("Could not load questions.");
    }

    fn render_ledger(&mut self, entries: &[ScoreEntry]) {
        if entries.is_empty() {
            println!("No scores yet.");
        } else {
            println!("{}", ledger_table(entries));
        }
    }

    fn apply_visibility(&mut self, visibility: Visibility, prefill: Option<&str>) {
        self.name_field_visible = visibility.name_field;
        if let Some(name) = prefill {
            self.name_field = name.to_string();
        }
    }

    fn clear_name_field(&mut self) {
        self.name_field.clear();
    }

    fn clear_selections(&mut self) {}

    fn show_notice(&mut self, message: &str) {
        println!("! {message}");
    }
}

/// Line-oriented prompts. `None` means input is exhausted.
struct Prompter<I> {
    input: I,
}

impl<I: BufRead> Prompter<I> {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

enum Next {
    Replay,
    NewPlayer,
    Quit,
}

pub async fn execute(
    name: Option<String>,
    ephemeral: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = create_source(&config.source)?;

    let (session_store, ledger_store): (Box<dyn SessionStore>, Box<dyn LedgerStore>) =
        if ephemeral {
            (
                Box::new(MemorySessionStore::new()),
                Box::new(MemoryLedgerStore::new()),
            )
        } else {
            let data_dir = DataDir::new(&config.data_dir);
            (
                Box::new(data_dir.session_store()),
                Box::new(data_dir.ledger_store()),
            )
        };

    let mut game = Game::new(
        source,
        session_store,
        ledger_store,
        TerminalRenderer::default(),
        config.game_config(),
    );

    let stdin = io::stdin();
    let mut prompter = Prompter {
        input: stdin.lock(),
    };
    let mut name = name;

    game.start().await;

    loop {
        let question_count = game.round().map_or(0, Round::len);
        if question_count == 0 {
            tracing::warn!("no questions to play, ending session");
            println!("No round to play.");
            break;
        }

        if !answer_round(&mut game, &mut prompter, question_count)? {
            return Ok(());
        }
        if !submit_round(&mut game, &mut prompter, &mut name, question_count)? {
            return Ok(());
        }

        match choose_next(&mut prompter)? {
            Next::Replay => game.load_round().await,
            Next::NewPlayer => game.new_player().await,
            Next::Quit => break,
        }
    }

    Ok(())
}

/// Ask for one answer per question. Returns `false` when input ran out.
fn answer_round<I: BufRead>(
    game: &mut Game<TerminalRenderer>,
    prompter: &mut Prompter<I>,
    question_count: usize,
) -> Result<bool> {
    let mut question = 0;
    while question < question_count {
        let prompt = format!("Answer {} [1-4, blank to skip]: ", question + 1);
        let Some(answer) = prompter.ask(&prompt)? else {
            return Ok(false);
        };
        if answer.is_empty() {
            question += 1;
            continue;
        }
        let choice = match answer.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                println!("Enter a choice number or leave blank.");
                continue;
            }
        };
        match game.select(question, choice) {
            Ok(()) => question += 1,
            Err(e) => println!("{e}"),
        }
    }
    Ok(true)
}

/// Submit under the remembered, given or typed name.
fn submit_round<I: BufRead>(
    game: &mut Game<TerminalRenderer>,
    prompter: &mut Prompter<I>,
    name: &mut Option<String>,
    question_count: usize,
) -> Result<bool> {
    loop {
        let username = match game.renderer().remembered_name() {
            Some(remembered) => remembered.to_string(),
            None => match name.take() {
                Some(given) => given,
                None => match prompter.ask("Your name: ")? {
                    Some(typed) => typed,
                    None => return Ok(false),
                },
            },
        };

        match game.submit(&username) {
            Ok(submission) => {
                let entry = submission.entry;
                let who = if entry.username.is_empty() {
                    "You"
                } else {
                    entry.username.as_str()
                };
                if submission.recorded {
                    println!("{who} scored {}/{question_count}", entry.score);
                } else {
                    tracing::warn!(score = entry.score, "score was not saved");
                    println!("{who} scored {}/{question_count} (not recorded)", entry.score);
                }
                return Ok(true);
            }
            Err(GameError::UsernameRequired) => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

fn choose_next<I: BufRead>(prompter: &mut Prompter<I>) -> Result<Next> {
    loop {
        let Some(choice) = prompter.ask("[r]eplay, [n]ew player, [q]uit: ")? else {
            return Ok(Next::Quit);
        };
        match choice.to_lowercase().as_str() {
            "r" | "replay" => return Ok(Next::Replay),
            "n" | "new" | "new player" => return Ok(Next::NewPlayer),
            "q" | "quit" => return Ok(Next::Quit),
            _ => println!("Unknown choice '{choice}'."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remembered_name_requires_hidden_field() {
        let mut renderer = TerminalRenderer::default();
        renderer.apply_visibility(Visibility::for_session(false), None);
        assert_eq!(renderer.remembered_name(), None);

        renderer.apply_visibility(Visibility::for_session(true), Some("Ada"));
        assert_eq!(renderer.remembered_name(), Some("Ada"));

        renderer.clear_name_field();
        renderer.apply_visibility(Visibility::for_session(false), None);
        assert_eq!(renderer.remembered_name(), None);
    }

    #[test]
    fn prompter_reports_eof() {
        let mut prompter = Prompter {
            input: io::Cursor::new("  Bob  \n"),
        };
        assert_eq!(prompter.ask("> ").unwrap().as_deref(), Some("Bob"));
        assert_eq!(prompter.ask("> ").unwrap(), None);
    }

    #[test]
    fn menu_choices() {
        let mut prompter = Prompter {
            input: io::Cursor::new("x\nR\n"),
        };
        assert!(matches!(choose_next(&mut prompter).unwrap(), Next::Replay));

        let mut prompter = Prompter {
            input: io::Cursor::new(""),
        };
        assert!(matches!(choose_next(&mut prompter).unwrap(), Next::Quit));
    }
}
