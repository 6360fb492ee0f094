use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskboard::config::{config_path, Config};
use taskboard::error::{ConfigError, SeedError};
use taskboard::models::{Priority, Status};
use taskboard::seed::{load_seed, session_store};

// Use a mutex to ensure env-var tests run serially
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const SEED: &str = r#"[
    {"title": "Oldest", "status": "completed", "priority": "low"},
    {"title": "Middle", "description": "has notes", "status": "in-progress", "priority": "high",
     "due_date": "2025-05-09T09:00:00+00:00", "shared_with": ["kim", "lee"]},
    {"title": "Newest"}
]"#;

#[test]
fn test_seed_creates_in_file_order() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tasks.json", SEED);

    let store = session_store("casey", Some(&path)).unwrap();
    let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    assert!(store.tasks().iter().all(|t| t.user_id == "casey"));

    let middle = &store.tasks()[1];
    assert_eq!(middle.status, Status::InProgress);
    assert_eq!(middle.priority, Priority::High);
    assert_eq!(middle.description.as_deref(), Some("has notes"));
    assert_eq!(middle.shared_with.as_ref().map(Vec::len), Some(2));
    assert_eq!(middle.due_date.map(|d| d.timestamp()), Some(1_746_781_200));

    let newest = &store.tasks()[0];
    assert_eq!(newest.status, Status::Todo);
    assert_eq!(newest.priority, Priority::Medium);
}

#[test]
fn test_session_without_seed_is_empty() {
    let store = session_store("casey", None).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.owner(), "casey");
}

#[test]
fn test_seed_errors() {
    let dir = TempDir::new().unwrap();
    let bad = write_file(&dir, "bad.json", r#"[{"title": "x", "status": "blocked"}]"#);
    assert!(matches!(load_seed(&bad), Err(SeedError::Parse { .. })));

    let missing = dir.path().join("nope.json");
    assert!(matches!(load_seed(&missing), Err(SeedError::Read { .. })));
}

#[test]
fn test_seed_rejects_blank_titles() {
    let dir = TempDir::new().unwrap();
    let empty = write_file(&dir, "empty.json", r#"[{"title": ""}]"#);
    assert!(matches!(
        load_seed(&empty),
        Err(SeedError::EmptyTitle { index: 0, .. })
    ));

    let blank = write_file(&dir, "blank.json", r#"[{"title": "Fine"}, {"title": "   "}]"#);
    assert!(matches!(
        session_store("casey", Some(&blank)),
        Err(SeedError::EmptyTitle { index: 1, .. })
    ));

    let padded = write_file(&dir, "padded.json", r#"[{"title": "  Buy milk "}]"#);
    assert_eq!(load_seed(&padded).unwrap()[0].title, "Buy milk");
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "config.toml",
        r##"
owner = "robin"
theme = "paper"
log_level = "debug"

[colors]
alert = "#FF0000"
"##,
    );

    let cfg = Config::load(Some(&path)).unwrap();
    assert_eq!(cfg.owner, "robin");
    assert_eq!(cfg.theme, "paper");
    assert_eq!(cfg.log_level.as_deref(), Some("debug"));
    assert_eq!(cfg.log_file, None);
    assert_eq!(cfg.colors.get("alert").map(String::as_str), Some("#FF0000"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let cfg = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.owner, "current-user");
    assert_eq!(cfg.theme, "classic");
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "config.toml", "theme = [unclosed");
    assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_config_path_resolution() {
    let _guard = TEST_MUTEX.lock().unwrap();
    let dir = TempDir::new().unwrap();
    let from_env = write_file(&dir, "env.toml", "owner = \"from-env\"\n");

    env::set_var("TASKBOARD_CONFIG", &from_env);
    assert_eq!(config_path(None), from_env);
    assert_eq!(Config::load(None).unwrap().owner, "from-env");

    let explicit = dir.path().join("explicit.toml");
    assert_eq!(config_path(Some(&explicit)), explicit);

    env::remove_var("TASKBOARD_CONFIG");
    assert!(config_path(None).ends_with("taskboard/config.toml"));
}
