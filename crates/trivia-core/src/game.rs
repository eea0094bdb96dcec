//! The submission state machine.
//!
//! Ties a question source, the two stores and a renderer together:
//! `Idle -> AwaitingAnswers` on a successful load, `AwaitingAnswers ->
//! Submitted` on submission, and back to `Idle` through "new player".

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, SourceError};
use crate::ledger::ScoreLedger;
use crate::model::{Question, Round, ScoreEntry};
use crate::round::render_round;
use crate::scorer::{compute_score, Selections};
use crate::session::{SessionManager, DEFAULT_SESSION_TTL_DAYS};
use crate::traits::{LedgerStore, QuestionSource, Renderer, RoundRequest, SessionStore};

/// Message shown when a submission is blocked for lack of a name.
pub const NAME_REQUIRED_NOTICE: &str = "Please enter your name before submitting.";

/// Where the game is in its round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Idle,
    AwaitingAnswers,
    Submitted,
}

/// What a submission without a player name does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyUsernamePolicy {
    /// Refuse the submission and show a notice.
    #[default]
    Block,
    /// Score the round but persist neither session nor ledger entry.
    SkipPersistence,
}

impl fmt::Display for EmptyUsernamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyUsernamePolicy::Block => write!(f, "block"),
            EmptyUsernamePolicy::SkipPersistence => write!(f, "skip_persistence"),
        }
    }
}

impl FromStr for EmptyUsernamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "block" => Ok(EmptyUsernamePolicy::Block),
            "skip_persistence" | "skip" => Ok(EmptyUsernamePolicy::SkipPersistence),
            other => Err(format!("unknown empty-username policy: {other}")),
        }
    }
}

/// Configuration for a game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// What each round asks the source for.
    pub round: RoundRequest,
    /// Lifetime of a remembered player.
    pub session_ttl_days: u32,
    /// Whether "new player" immediately loads a fresh round.
    pub new_player_fetches_round: bool,
    /// Handling of submissions without a name.
    pub empty_username: EmptyUsernamePolicy,
    /// Fixed seed for choice shuffling; `None` seeds from the OS.
    pub shuffle_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round: RoundRequest::default(),
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
            new_player_fetches_round: true,
            empty_username: EmptyUsernamePolicy::Block,
            shuffle_seed: None,
        }
    }
}

/// The outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Player and score. The username is empty when nothing was persisted.
    pub entry: ScoreEntry,
    /// Whether the entry made it into the ledger store.
    pub recorded: bool,
}

/// An outstanding round request.
///
/// Only the most recently issued ticket may replace the rendered round.
#[derive(Debug, Clone)]
pub struct PendingLoad {
    generation: u64,
    request: RoundRequest,
}

impl PendingLoad {
    pub fn request(&self) -> &RoundRequest {
        &self.request
    }
}

/// One player-facing trivia game.
pub struct Game<R: Renderer> {
    source: Arc<dyn QuestionSource>,
    session: SessionManager,
    ledger: ScoreLedger,
    renderer: R,
    config: GameConfig,
    rng: StdRng,
    state: GameState,
    round: Option<Round>,
    selections: Selections,
    generation: u64,
}

impl<R: Renderer> Game<R> {
    pub fn new(
        source: Arc<dyn QuestionSource>,
        session_store: Box<dyn SessionStore>,
        ledger_store: Box<dyn LedgerStore>,
        renderer: R,
        config: GameConfig,
    ) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            source,
            session: SessionManager::new(session_store).with_ttl_days(config.session_ttl_days),
            ledger: ScoreLedger::new(ledger_store),
            renderer,
            config,
            rng,
            state: GameState::Idle,
            round: None,
            selections: Selections::new(),
            generation: 0,
        }
    }

    /// Page load: restore the session, load a round, show prior scores.
    pub async fn start(&mut self) {
        self.session.restore_session(&mut self.renderer);
        self.load_round().await;
        self.ledger.render_ledger(&mut self.renderer);
    }

    // -----------------------------------------------------------------------
    // Question loading
    // -----------------------------------------------------------------------

    /// Fetch and render one batch. Failures leave an empty round.
    pub async fn load_round(&mut self) {
        let pending = self.begin_load();
        let source = Arc::clone(&self.source);
        let outcome = source.fetch(pending.request()).await;
        self.finish_load(pending, outcome);
    }

    /// Start a load: show the loading indicator and issue a ticket.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> PendingLoad {
        self.generation += 1;
        self.renderer.set_loading(true);
        tracing::debug!(generation = self.generation, "round requested");
        PendingLoad {
            generation: self.generation,
            request: self.config.round.clone(),
        }
    }

    /// Complete a load started with [`Game::begin_load`].
    ///
    /// Returns `false` when the ticket is stale and the outcome was dropped.
    pub fn finish_load(
        &mut self,
        pending: PendingLoad,
        outcome: anyhow::Result<Vec<Question>>,
    ) -> bool {
        if pending.generation != self.generation {
            tracing::debug!(
                stale = pending.generation,
                latest = self.generation,
                "ignoring stale round response"
            );
            return false;
        }

        self.renderer.set_loading(false);
        self.selections.clear();

        match outcome {
            Ok(questions) => {
                let round = render_round(&questions, &mut self.rng);
                self.renderer.render_round(&round);
                self.state = if round.is_empty() {
                    tracing::warn!("question source returned an empty batch");
                    GameState::Idle
                } else {
                    GameState::AwaitingAnswers
                };
                tracing::info!(
                    round = %round.id,
                    questions = round.len(),
                    source = self.source.name(),
                    "round loaded"
                );
                self.round = Some(round);
            }
            Err(e) => {
                match e.downcast_ref::<SourceError>() {
                    Some(source_err) => tracing::error!(
                        permanent = source_err.is_permanent(),
                        "failed to load round: {source_err}"
                    ),
                    None => tracing::error!("failed to load round: {e:#}"),
                }
                self.round = None;
                self.renderer.clear_round();
                self.state = GameState::Idle;
            }
        }
        true
    }

    // -----------------------------------------------------------------------
    // Player actions
    // -----------------------------------------------------------------------

    /// Select `choice` on `question`, replacing any earlier selection.
    pub fn select(&mut self, question: usize, choice: usize) -> Result<(), GameError> {
        let round = self
            .round
            .as_ref()
            .ok_or(GameError::NoSuchQuestion(question))?;
        self.selections.select_in(round, question, choice)
    }

    /// Score of the current selections.
    pub fn score(&self) -> u32 {
        self.round
            .as_ref()
            .map_or(0, |round| compute_score(round, &self.selections))
    }

    /// Submit the current selections for `username`.
    ///
    /// On success, in order: persist the session, compute the score, append
    /// to the ledger, re-render the ledger, refresh visibility. A failed
    /// ledger write still scores the round; `recorded` is then `false`.
    pub fn submit(&mut self, username: &str) -> Result<Submission, GameError> {
        let username = username.trim();

        if username.is_empty() {
            return match self.config.empty_username {
                EmptyUsernamePolicy::Block => {
                    self.renderer.show_notice(NAME_REQUIRED_NOTICE);
                    Err(GameError::UsernameRequired)
                }
                EmptyUsernamePolicy::SkipPersistence => {
                    let score = self.score();
                    tracing::warn!(score, "submission without a name, not recorded");
                    self.state = GameState::Submitted;
                    Ok(Submission {
                        entry: ScoreEntry::new("", score),
                        recorded: false,
                    })
                }
            };
        }

        self.session
            .set_session(username, self.config.session_ttl_days)?;
        let score = self.score();
        let recorded = self.ledger.append_entry(username, score);
        self.ledger.render_ledger(&mut self.renderer);
        self.session.restore_session(&mut self.renderer);
        self.state = GameState::Submitted;

        Ok(Submission {
            entry: ScoreEntry::new(username, score),
            recorded,
        })
    }

    /// Forget the current player and start over.
    pub async fn new_player(&mut self) {
        self.session.clear_session();
        self.renderer.clear_name_field();
        self.selections.clear();
        self.renderer.clear_selections();
        self.session.restore_session(&mut self.renderer);
        self.state = GameState::Idle;

        if self.config.new_player_fetches_round {
            self.load_round().await;
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn current_player(&self) -> Option<String> {
        self.session.current()
    }

    pub fn ledger_entries(&self) -> Vec<ScoreEntry> {
        self.ledger.entries()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Tear the game down, keeping the view.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
