use std::time::Duration;

use clap::Parser;
use platformer::config::{check_terminal, CollisionFlag, Config, ConfigError};
use platformer::constants::MAX_START_LEVEL;
use platformer::physics::CollisionMode;

#[test]
fn defaults_are_valid() {
    let config = Config::default();
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.collision_mode(), CollisionMode::Axis);
    assert_eq!(config.frame_duration(), Duration::from_secs(1) / 60);
}

#[test]
fn parses_flags() {
    let config = Config::try_parse_from([
        "platformer",
        "--fps",
        "30",
        "--seed",
        "99",
        "--start-level",
        "4",
        "--collision",
        "combined",
    ])
    .expect("valid arguments");
    assert_eq!(config.fps, 30);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.start_level, 4);
    assert_eq!(config.collision, CollisionFlag::Combined);
    assert_eq!(config.collision_mode(), CollisionMode::Combined);
}

#[test]
fn parse_without_flags_matches_default() {
    let parsed = Config::try_parse_from(["platformer"]).expect("no arguments");
    let default = Config::default();
    assert_eq!(parsed.fps, default.fps);
    assert_eq!(parsed.seed, default.seed);
    assert_eq!(parsed.start_level, default.start_level);
    assert_eq!(parsed.collision, default.collision);
}

#[test]
fn unknown_collision_mode_is_rejected() {
    assert!(Config::try_parse_from(["platformer", "--collision", "sideways"]).is_err());
}

#[test]
fn rejects_out_of_range_fps() {
    let zero = Config { fps: 0, ..Config::default() };
    assert_eq!(zero.validate(), Err(ConfigError::Fps(0)));
    let fast = Config { fps: 1000, ..Config::default() };
    assert_eq!(fast.validate(), Err(ConfigError::Fps(1000)));
}

#[test]
fn rejects_level_zero() {
    let config = Config { start_level: 0, ..Config::default() };
    assert_eq!(config.validate(), Err(ConfigError::StartLevel(0)));
}

#[test]
fn rejects_levels_beyond_the_cap() {
    let top = Config { start_level: MAX_START_LEVEL, ..Config::default() };
    assert_eq!(top.validate(), Ok(()));

    let huge = Config { start_level: 4_000_000_000, ..Config::default() };
    let err = huge.validate().unwrap_err();
    assert_eq!(err, ConfigError::StartLevel(4_000_000_000));
    assert_eq!(err.to_string(), "start level must be between 1 and 99, got 4000000000");

    let parsed = Config::try_parse_from(["platformer", "--start-level", "100"]).expect("parses");
    assert_eq!(parsed.validate(), Err(ConfigError::StartLevel(100)));
}

#[test]
fn terminal_size_check() {
    assert!(check_terminal(80, 24).is_ok());
    let err = check_terminal(20, 10).unwrap_err();
    assert_eq!(err, ConfigError::TerminalTooSmall { width: 20, height: 10 });
    assert_eq!(err.to_string(), "terminal is 20x10, need at least 40x16");
}
