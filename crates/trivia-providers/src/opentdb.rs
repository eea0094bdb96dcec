//! Open Trivia Database (opentdb.com) question source.

use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use trivia_core::error::SourceError;
use trivia_core::model::Question;
use trivia_core::traits::{QuestionSource, RoundRequest};

use crate::entities::decode_html_entities;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of wrong answers on a multiple-choice item.
const INCORRECT_PER_ITEM: usize = 3;

/// HTTP client for the Open Trivia DB `api.php` endpoint.
pub struct OpenTdbSource {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenTdbSource {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    /// The full request URL for `request`.
    pub fn request_url(&self, request: &RoundRequest) -> String {
        let mut url = format!(
            "{}/api.php?amount={}&type=multiple",
            self.base_url, request.amount
        );
        if let Some(category) = request.category {
            url.push_str(&format!("&category={category}"));
        }
        if let Some(difficulty) = request.difficulty {
            url.push_str(&format!("&difficulty={difficulty}"));
        }
        url
    }
}

#[derive(Deserialize)]
struct OpenTdbResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<OpenTdbItem>,
}

#[derive(Deserialize)]
struct OpenTdbItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    category: Option<String>,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl OpenTdbItem {
    fn into_question(self) -> Option<Question> {
        if self.kind != "multiple" || self.incorrect_answers.len() != INCORRECT_PER_ITEM {
            tracing::warn!(
                kind = %self.kind,
                incorrect = self.incorrect_answers.len(),
                "skipping item that is not a four-option question"
            );
            return None;
        }
        Some(Question {
            prompt: decode_html_entities(&self.question),
            correct_answer: decode_html_entities(&self.correct_answer),
            incorrect_answers: self
                .incorrect_answers
                .iter()
                .map(|a| decode_html_entities(a))
                .collect(),
            category: self.category.as_deref().map(decode_html_entities),
            difficulty: self.difficulty.and_then(|d| d.parse().ok()),
        })
    }
}

/// Human-readable meaning of a non-zero `response_code`.
fn response_code_message(code: u8) -> &'static str {
    match code {
        1 => "not enough questions for the requested filters",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "rate limited, too many requests",
        _ => "unknown response code",
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    fn name(&self) -> &str {
        "opentdb"
    }

    #[instrument(skip(self, request), fields(amount = request.amount))]
    async fn fetch(&self, request: &RoundRequest) -> anyhow::Result<Vec<Question>> {
        let start = Instant::now();
        let url = self.request_url(request);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                SourceError::NetworkError(format!(
                    "question bank not reachable at {}: {e}",
                    self.base_url
                ))
            } else {
                SourceError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let body: OpenTdbResponse = response
            .json()
            .await
            .map_err(|e| SourceError::MalformedResponse(format!("failed to parse response: {e}")))?;

        if body.response_code != 0 {
            return Err(SourceError::ResponseCode {
                code: body.response_code,
                message: response_code_message(body.response_code).to_string(),
            }
            .into());
        }

        let questions: Vec<Question> = body
            .results
            .into_iter()
            .filter_map(OpenTdbItem::into_question)
            .collect();

        tracing::debug!(
            questions = questions.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "batch fetched"
        );
        Ok(questions)
    }
}
