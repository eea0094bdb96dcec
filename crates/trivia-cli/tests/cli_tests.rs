//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn trivia() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.env_remove("TRIVIA_DATA_DIR")
        .env_remove("TRIVIA_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// A working directory with a config pointing at the offline question bank.
fn mock_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("trivia.toml"),
        "data_dir = \"data\"\nshuffle_seed = 7\n\n[source]\ntype = \"mock\"\n",
    )
    .unwrap();
    dir
}

fn skip_all_answers() -> String {
    "\n".repeat(10)
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    trivia()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created trivia.toml"));

    assert!(dir.path().join("trivia.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    trivia().current_dir(dir.path()).arg("init").assert().success();

    trivia()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn scores_on_empty_data_dir() {
    let dir = mock_workspace();

    trivia()
        .current_dir(dir.path())
        .arg("scores")
        .assert()
        .success()
        .stdout(predicate::str::contains("No scores yet."));
}

#[test]
fn scores_rejects_unknown_format() {
    let dir = mock_workspace();

    trivia()
        .current_dir(dir.path())
        .args(["scores", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn missing_config_file_fails() {
    trivia()
        .args(["scores", "--config", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn play_with_no_answers_records_zero() {
    let dir = mock_workspace();
    let input = format!("{}Bob\nq\n", skip_all_answers());

    trivia()
        .current_dir(dir.path())
        .arg("play")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("Bob scored 0/10"));

    let raw = std::fs::read_to_string(dir.path().join("data/local-storage.json")).unwrap();
    let storage: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        storage["triviaScores"].as_str(),
        Some(r#"[{"username":"Bob","score":0}]"#)
    );

    trivia()
        .current_dir(dir.path())
        .args(["scores", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\": \"Bob\""))
        .stdout(predicate::str::contains("\"score\": 0"));
}

#[test]
fn empty_name_is_blocked_until_given() {
    let dir = mock_workspace();
    let input = format!("{}\nAda\nq\n", skip_all_answers());

    trivia()
        .current_dir(dir.path())
        .arg("play")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter your name"))
        .stdout(predicate::str::contains("Ada scored 0/10"));
}

#[test]
fn session_is_remembered_between_runs() {
    let dir = mock_workspace();

    trivia()
        .current_dir(dir.path())
        .args(["play", "--name", "Ada"])
        .write_stdin(format!("{}q\n", skip_all_answers()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada scored 0/10"));

    trivia()
        .current_dir(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada (remembered until"));

    // No name prompt the second time around.
    trivia()
        .current_dir(dir.path())
        .arg("play")
        .write_stdin(format!("{}q\n", skip_all_answers()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Your name:").not())
        .stdout(predicate::str::contains("Ada scored 0/10"));

    trivia()
        .current_dir(dir.path())
        .arg("new-player")
        .assert()
        .success()
        .stdout(predicate::str::contains("Forgot Ada."));

    trivia()
        .current_dir(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("No player remembered."));
}

#[test]
fn new_player_from_menu_asks_for_a_name() {
    let dir = mock_workspace();
    let answers = skip_all_answers();
    let input = format!("{answers}Ada\nn\n{answers}Bob\nq\n");

    trivia()
        .current_dir(dir.path())
        .arg("play")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada scored 0/10"))
        .stdout(predicate::str::contains("Bob scored 0/10"));

    trivia()
        .current_dir(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob"));
}

#[test]
fn ephemeral_play_leaves_no_files() {
    let dir = mock_workspace();

    trivia()
        .current_dir(dir.path())
        .args(["play", "--ephemeral", "--name", "Eve"])
        .write_stdin(format!("{}q\n", skip_all_answers()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Eve scored 0/10"));

    assert!(!dir.path().join("data").exists());
}

#[test]
fn eof_quits_cleanly() {
    let dir = mock_workspace();

    trivia()
        .current_dir(dir.path())
        .arg("play")
        .write_stdin("\n\n")
        .assert()
        .success();

    assert!(!dir.path().join("data/local-storage.json").exists());
}

#[test]
fn page_writes_html() {
    let dir = mock_workspace();

    trivia()
        .current_dir(dir.path())
        .args(["page", "--output", "out/trivia.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 10 question(s)"));

    let html = std::fs::read_to_string(dir.path().join("out/trivia.html")).unwrap();
    assert!(html.contains("<html"));
    assert_eq!(html.matches("<fieldset class=\"question\">").count(), 10);
}

#[test]
fn unwritable_ledger_is_reported_as_not_recorded() {
    let dir = mock_workspace();
    std::fs::create_dir_all(dir.path().join("data/local-storage.json")).unwrap();

    trivia()
        .current_dir(dir.path())
        .args(["play", "--name", "Ada"])
        .write_stdin(format!("{}q\n", skip_all_answers()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada scored 0/10 (not recorded)"))
        .stderr(predicate::str::contains("score was not saved"));
}

#[test]
fn unreachable_source_ends_play() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("trivia.toml"),
        "data_dir = \"data\"\n\n[source]\ntype = \"opentdb\"\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n",
    )
    .unwrap();

    trivia()
        .current_dir(dir.path())
        .arg("play")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No round to play."))
        .stderr(predicate::str::contains("no questions to play"));
}

#[test]
fn out_of_range_session_ttl_does_not_crash() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("trivia.toml"),
        "data_dir = \"data\"\nsession_ttl_days = 200000000\n\n[source]\ntype = \"mock\"\n",
    )
    .unwrap();

    trivia()
        .current_dir(dir.path())
        .args(["play", "--name", "Ada"])
        .write_stdin(format!("{}q\n", skip_all_answers()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada scored 0/10"));

    trivia()
        .current_dir(dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("No player remembered."));
}
