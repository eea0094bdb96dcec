//! trivia-report — Static HTML rendering of the game page.

pub mod html;

pub use html::{generate_html, write_html_page, HtmlPage};
