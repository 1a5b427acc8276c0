use clap::{CommandFactory, FromArgMatches, Parser};
use dartgust::config::Config;
use dartgust::error::DartError;
use dartgust::geometry::Arena;
use std::fs;
use tempfile::tempdir;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let matches = TestCli::command().get_matches_from(args);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

#[test]
fn test_defaults_match_the_task() {
    let c = Config::default();
    assert_eq!(c.timing.lockout_ms, 900.0);
    assert_eq!(c.timing.gust_warning_ms, 4500.0);
    assert_eq!(c.timing.base_flight_ms, 900.0);
    assert_eq!(c.timing.gust_flight_ms, 3200.0);
    assert_eq!(c.timing.feedback_ms, 1200.0);
    assert_eq!(c.gesture.min_hold_ms, 250.0);
    assert_eq!(c.gesture.min_drag_px, 45.0);
    assert_eq!(c.session.main_gust_warning_ms, 4700.0);
    assert_eq!(c.session.main_gust_flight_ms, 3400.0);
    assert_eq!(c.session.forced_zone, "TR50");
    assert!(c.validate().is_ok());
}

#[test]
fn test_clap_defaults_agree_with_default_impl() {
    let (cli, _) = parse(&["test"]);
    assert_eq!(cli.config.timing, Config::default().timing);
    assert_eq!(cli.config.gesture, Config::default().gesture);
    assert_eq!(cli.config.session, Config::default().session);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "timing": { "lockout_ms": 700.0 }, "session": { "forced_zone": "BR80" } }"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.timing.lockout_ms, 700.0);
    assert_eq!(config.timing.feedback_ms, 1200.0);
    assert_eq!(config.session.forced_zone, "BR80");
    assert_eq!(config.session.main_trials, 24);
}

#[test]
fn test_cli_overrides_only_typed_flags() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "timing": { "lockout_ms": 700.0, "feedback_ms": 2000.0 } }"#,
    )
    .unwrap();
    let mut config = Config::load_from_file(&path).unwrap();

    let (cli, matches) = parse(&["test", "--lockout-ms", "500", "--gust-every", "3"]);
    config.merge_from_cli(&cli.config, &matches);

    assert_eq!(config.timing.lockout_ms, 500.0);
    assert_eq!(config.session.gust_every, 3);
    // Not typed: the file value survives clap's default of 1200
    assert_eq!(config.timing.feedback_ms, 2000.0);
}

#[test]
fn test_invalid_files_are_errors() {
    let dir = tempdir().unwrap();

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&broken),
        Err(DartError::Json(_))
    ));

    let negative = dir.path().join("negative.json");
    fs::write(&negative, r#"{ "timing": { "base_flight_ms": 0.0 } }"#).unwrap();
    assert!(matches!(
        Config::load_from_file(&negative),
        Err(DartError::Config(_))
    ));

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        Config::load_from_file(&missing),
        Err(DartError::Io(_))
    ));
}

#[test]
fn test_arena_round_trips_through_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arena.json");
    let arena = Arena::standard();
    fs::write(&path, serde_json::to_string_pretty(&arena).unwrap()).unwrap();

    let loaded = Arena::load_from_file(&path).unwrap();
    assert_eq!(loaded, arena);
}

#[test]
fn test_arena_with_overflowing_bonus_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arena.json");
    let mut arena = Arena::standard();
    arena.bonus_zones[0].bonus = u32::MAX;
    fs::write(&path, serde_json::to_string(&arena).unwrap()).unwrap();

    assert!(matches!(
        Arena::load_from_file(&path),
        Err(DartError::Config(_))
    ));
}
