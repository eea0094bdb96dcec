//! Configuration loading and question source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use trivia_core::game::{EmptyUsernamePolicy, GameConfig};
use trivia_core::session::DEFAULT_SESSION_TTL_DAYS;
use trivia_core::traits::{QuestionSource, RoundRequest};

use crate::mock::MockSource;
use crate::opentdb::{OpenTdbSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Where questions come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    OpenTdb {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    /// Built-in offline bank.
    Mock,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::OpenTdb {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level trivia configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaConfig {
    /// Question source settings.
    #[serde(default)]
    pub source: SourceConfig,
    /// What each round requests.
    #[serde(default)]
    pub round: RoundRequest,
    /// Days a remembered player stays remembered.
    #[serde(default = "default_ttl")]
    pub session_ttl_days: u32,
    /// Whether "new player" immediately fetches a fresh round.
    #[serde(default = "default_true")]
    pub new_player_fetches_round: bool,
    /// Submission handling when no name is given.
    #[serde(default)]
    pub empty_username: EmptyUsernamePolicy,
    /// Directory holding the cookie jar and local storage files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Fixed seed for choice shuffling.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

fn default_ttl() -> u32 {
    DEFAULT_SESSION_TTL_DAYS
}
fn default_true() -> bool {
    true
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./trivia-data")
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            round: RoundRequest::default(),
            session_ttl_days: default_ttl(),
            new_player_fetches_round: true,
            empty_username: EmptyUsernamePolicy::default(),
            data_dir: default_data_dir(),
            shuffle_seed: None,
        }
    }
}

impl TriviaConfig {
    /// The game settings carried by this configuration.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            round: self.round.clone(),
            session_ttl_days: self.session_ttl_days,
            new_player_fetches_round: self.new_player_fetches_round,
            empty_username: self.empty_username,
            shuffle_seed: self.shuffle_seed,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `trivia.toml` in the current directory
/// 2. `~/.config/trivia/config.toml`
///
/// Environment variable overrides: `TRIVIA_API_URL`, `TRIVIA_DATA_DIR`.
pub fn load_config() -> Result<TriviaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TriviaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("trivia.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TriviaConfig::default(),
    };

    Ok(apply_overrides(config))
}

/// Parse a configuration document.
pub fn parse_config(content: &str) -> Result<TriviaConfig> {
    Ok(toml::from_str::<TriviaConfig>(content)?)
}

fn apply_overrides(mut config: TriviaConfig) -> TriviaConfig {
    if let Ok(url) = std::env::var("TRIVIA_API_URL") {
        match &mut config.source {
            SourceConfig::OpenTdb { base_url, .. } => *base_url = url,
            SourceConfig::Mock => {
                tracing::debug!("TRIVIA_API_URL ignored for the mock source");
            }
        }
    }
    if let Ok(dir) = std::env::var("TRIVIA_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    if let SourceConfig::OpenTdb { base_url, .. } = &mut config.source {
        *base_url = resolve_env_vars(base_url);
    }
    config.data_dir = PathBuf::from(resolve_env_vars(&config.data_dir.to_string_lossy()));
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("trivia"))
}

/// Create a question source from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn QuestionSource>> {
    match config {
        SourceConfig::OpenTdb {
            base_url,
            timeout_secs,
        } => Ok(Arc::new(OpenTdbSource::new(base_url, *timeout_secs)?)),
        SourceConfig::Mock => Ok(Arc::new(MockSource::sample())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::Difficulty;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_TRIVIA_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_TRIVIA_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_TRIVIA_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_TRIVIA_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_TRIVIA_SELF_REF", "${_TRIVIA_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a/${_TRIVIA_SELF_REF}/b"),
            "a/${_TRIVIA_SELF_REF}/b"
        );
        std::env::remove_var("_TRIVIA_SELF_REF");

        assert_eq!(resolve_env_vars("${_TRIVIA_UNSET_VAR}x"), "x");
        assert_eq!(resolve_env_vars("open ${brace"), "open ${brace");
    }

    #[test]
    fn default_config() {
        let config = TriviaConfig::default();
        assert_eq!(config.round.amount, 10);
        assert_eq!(config.session_ttl_days, 7);
        assert!(config.new_player_fetches_round);
        assert_eq!(config.empty_username, EmptyUsernamePolicy::Block);
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
session_ttl_days = 3
new_player_fetches_round = false
empty_username = "skip_persistence"
data_dir = "/tmp/trivia"
shuffle_seed = 42

[source]
type = "opentdb"
base_url = "http://localhost:9999"
timeout_secs = 5

[round]
amount = 5
category = 18
difficulty = "easy"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.session_ttl_days, 3);
        assert!(!config.new_player_fetches_round);
        assert_eq!(
            config.empty_username,
            EmptyUsernamePolicy::SkipPersistence
        );
        assert_eq!(config.shuffle_seed, Some(42));
        assert_eq!(
            config.source,
            SourceConfig::OpenTdb {
                base_url: "http://localhost:9999".into(),
                timeout_secs: 5
            }
        );
        assert_eq!(config.round.amount, 5);
        assert_eq!(config.round.category, Some(18));
        assert_eq!(config.round.difficulty, Some(Difficulty::Easy));

        let game = config.game_config();
        assert_eq!(game.session_ttl_days, 3);
        assert_eq!(game.round.amount, 5);
    }

    #[test]
    fn parse_mock_source_with_partial_round() {
        let config = parse_config("[source]\ntype = \"mock\"\n\n[round]\namount = 3\n").unwrap();
        assert_eq!(config.source, SourceConfig::Mock);
        assert_eq!(config.round.amount, 3);
        assert_eq!(config.round.category, None);
    }

    #[test]
    fn rejects_unknown_source_type() {
        assert!(parse_config("[source]\ntype = \"jservice\"\n").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.toml");
        std::fs::write(&path, "[source]\ntype = \"mock\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.source, SourceConfig::Mock);
    }
}
