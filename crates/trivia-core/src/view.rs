//! Headless view state.
//!
//! `HeadlessRenderer` records what a page would show, which lets the game be
//! driven and inspected without any real presentation layer.

use crate::model::{Round, ScoreEntry, Visibility};
use crate::traits::Renderer;

/// Snapshot of everything a view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub loading_visible: bool,
    pub question_area_visible: bool,
    pub round: Option<Round>,
    pub ledger_rows: Vec<ScoreEntry>,
    pub name_field_visible: bool,
    pub new_player_visible: bool,
    pub name_field: String,
    pub notice: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading_visible: false,
            question_area_visible: true,
            round: None,
            ledger_rows: Vec::new(),
            name_field_visible: true,
            new_player_visible: false,
            name_field: String::new(),
            notice: None,
        }
    }
}

impl ViewState {
    /// Number of question blocks currently shown.
    pub fn question_count(&self) -> usize {
        self.round.as_ref().map_or(0, Round::len)
    }
}

/// A renderer that only keeps state.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    state: ViewState,
    selections_cleared: usize,
    ledger_renders: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Type into the name field, as a player would.
    pub fn type_name(&mut self, name: &str) {
        self.state.name_field = name.to_string();
    }

    pub fn selections_cleared(&self) -> usize {
        self.selections_cleared
    }

    pub fn ledger_renders(&self) -> usize {
        self.ledger_renders
    }
}

impl Renderer for HeadlessRenderer {
    fn set_loading(&mut self, loading: bool) {
        self.state.loading_visible = loading;
        self.state.question_area_visible = !loading;
    }

    fn render_round(&mut self, round: &Round) {
        self.state.round = Some(round.clone());
    }

    fn clear_round(&mut self) {
        self.state.round = None;
    }

    fn render_ledger(&mut self, entries: &[ScoreEntry]) {
        self.state.ledger_rows = entries.to_vec();
        self.ledger_renders += 1;
    }

    fn apply_visibility(&mut self, visibility: Visibility, prefill: Option<&str>) {
        self.state.name_field_visible = visibility.name_field;
        self.state.new_player_visible = visibility.new_player;
        if let Some(name) = prefill {
            self.state.name_field = name.to_string();
        }
    }

    fn clear_name_field(&mut self) {
        self.state.name_field.clear();
    }

    fn clear_selections(&mut self) {
        self.selections_cleared += 1;
    }

    fn show_notice(&mut self, message: &str) {
        self.state.notice = Some(message.to_string());
    }
}
