//! Config file to running session.

use std::fs;
use std::path::Path;
use std::time::Duration;

use memento_config::{ConfigError, MementoConfig};
use memento_engine::{MemoryScoreSink, RoundController, RoundPhase};
use memento_types::{Round, SettingsError};
use tempfile::tempdir;

#[test]
fn config_file_drives_session_timing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[timing]
memorize_secs = 4
play_secs = 6.5
transition_overlay_secs = 0.5

[board]
object_count = 4

[generator]
seed = 1234

[scores]
path = "/tmp/memento-scores.txt"
"#,
    )
    .unwrap();

    let config = MementoConfig::load_from(&path).unwrap();
    let settings = config.resolve().unwrap();
    assert_eq!(settings.seed(), Some(1234));
    assert_eq!(
        config.scores_path().as_deref(),
        Some(Path::new("/tmp/memento-scores.txt"))
    );

    let mut controller = RoundController::new(&settings, Box::new(MemoryScoreSink::new())).unwrap();
    controller.start().unwrap();
    assert_eq!(controller.placement().len(), 4);
    assert_eq!(controller.remaining_seconds(), Some(4));

    controller.advance(Duration::from_millis(4_500)).unwrap();
    assert_eq!(controller.phase(), RoundPhase::Play(Round::One));
    assert_eq!(controller.remaining_seconds(), Some(7));
}

#[test]
fn invalid_config_never_reaches_the_controller() {
    let config = MementoConfig::parse("[timing]\nplay_secs = 0\n").unwrap();
    assert!(matches!(
        config.resolve(),
        Err(ConfigError::Invalid(SettingsError::InvalidDuration {
            name: "play_secs",
            ..
        }))
    ));
}
