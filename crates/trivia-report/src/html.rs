//! HTML page renderer.
//!
//! Produces a self-contained page with all CSS inlined: the name form, the
//! rendered round as radio groups, the "new player" control, the loading
//! indicator and the score table.

use std::path::Path;

use anyhow::{Context, Result};

use trivia_core::model::{RenderedQuestion, Round, ScoreEntry, Visibility};
use trivia_core::traits::Renderer;
use trivia_core::view::{HeadlessRenderer, ViewState};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn hidden(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        " hidden"
    }
}

/// A renderer whose output is an HTML document.
#[derive(Debug, Default)]
pub struct HtmlPage {
    view: HeadlessRenderer,
}

impl HtmlPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    /// The page as it currently stands.
    pub fn to_html(&self) -> String {
        generate_html(self.view.state())
    }
}

impl Renderer for HtmlPage {
    fn set_loading(&mut self, loading: bool) {
        self.view.set_loading(loading);
    }

    fn render_round(&mut self, round: &Round) {
        self.view.render_round(round);
    }

    fn clear_round(&mut self) {
        self.view.clear_round();
    }

    fn render_ledger(&mut self, entries: &[ScoreEntry]) {
        self.view.render_ledger(entries);
    }

    fn apply_visibility(&mut self, visibility: Visibility, prefill: Option<&str>) {
        self.view.apply_visibility(visibility, prefill);
    }

    fn clear_name_field(&mut self) {
        self.view.clear_name_field();
    }

    fn clear_selections(&mut self) {
        self.view.clear_selections();
    }

    fn show_notice(&mut self, message: &str) {
        self.view.show_notice(message);
    }
}

fn question_block(html: &mut String, question: &RenderedQuestion) {
    html.push_str("<fieldset class=\"question\">\n");
    html.push_str(&format!(
        "<legend>{}. {}</legend>\n",
        question.index + 1,
        html_escape(&question.prompt)
    ));

    let meta: Vec<String> = question
        .category
        .iter()
        .map(|c| html_escape(c))
        .chain(question.difficulty.iter().map(|d| d.to_string()))
        .collect();
    if !meta.is_empty() {
        html.push_str(&format!("<p class=\"meta\">{}</p>\n", meta.join(" &middot; ")));
    }

    for (i, choice) in question.choices.iter().enumerate() {
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"question-{}\" value=\"{}\" data-correct=\"{}\"> {}</label>\n",
            question.index,
            i,
            choice.is_correct(),
            html_escape(choice.text())
        ));
    }
    html.push_str("</fieldset>\n");
}

/// Generate the page for a view state.
pub fn generate_html(view: &ViewState) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Trivia</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n<h1>Trivia</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Generated {}</p>\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    if let Some(notice) = &view.notice {
        html.push_str(&format!(
            "<p class=\"notice\" role=\"alert\">{}</p>\n",
            html_escape(notice)
        ));
    }

    html.push_str("<form id=\"trivia-form\">\n");
    html.push_str(&format!(
        "<label id=\"name-field\"{}>Your name <input type=\"text\" id=\"username\" name=\"username\" value=\"{}\"></label>\n",
        hidden(view.name_field_visible),
        html_escape(&view.name_field)
    ));
    html.push_str(&format!(
        "<div id=\"loading\"{}>Loading questions&hellip;</div>\n",
        hidden(view.loading_visible)
    ));
    html.push_str(&format!(
        "<div id=\"questions\"{}>\n",
        hidden(view.question_area_visible)
    ));
    if let Some(round) = &view.round {
        for question in &round.questions {
            question_block(&mut html, question);
        }
    }
    html.push_str("</div>\n");
    html.push_str("<button type=\"submit\">Submit</button>\n");
    html.push_str(&format!(
        "<button type=\"button\" id=\"new-player\"{}>New player</button>\n",
        hidden(view.new_player_visible)
    ));
    html.push_str("</form>\n");

    html.push_str("<section class=\"scores\">\n<h2>Scores</h2>\n");
    html.push_str("<table id=\"scores\">\n");
    html.push_str("<thead><tr><th>Player</th><th>Score</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for entry in &view.ledger_rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            html_escape(&entry.username),
            entry.score
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write the page for a view state to a file.
pub fn write_html_page(view: &ViewState, path: &Path) -> Result<()> {
    let html = generate_html(view);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write page to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --notice: #fef3c7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --notice: #78350f; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.notice { background: var(--notice); padding: 0.5rem 1rem; border-radius: 8px; }
fieldset.question { border: 1px solid var(--border); border-radius: 8px; margin: 1rem 0; padding: 1rem; }
fieldset.question label { display: block; margin: 0.25rem 0; cursor: pointer; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
button { margin: 0.5rem 0.5rem 0.5rem 0; padding: 0.5rem 1rem; }
"#;
