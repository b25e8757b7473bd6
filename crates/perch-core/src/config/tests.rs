use std::fs;

use super::template::generate_config;
use super::*;
use crate::error::Error;

#[test]
fn default_config_has_expected_values() {
    // Arrange / Act
    let config = Config::default();

    // Assert
    assert_eq!(config.toolbar.behavior, Behavior::Floating);
    assert_eq!(config.toolbar.monitor, 0);
    assert_eq!(config.toolbar.height, 56);
    assert_eq!(config.pill.geometry().width, 960);
    assert_eq!(config.pill.corner_radius, 34);
    assert!(config.switcher.icons);
}

#[test]
fn template_parses_to_defaults() {
    // Act
    let config: Config = toml::from_str(&generate_config()).unwrap();

    // Assert
    assert_eq!(config, Config::default());
}

#[test]
fn partial_toml_uses_defaults_for_missing_sections() {
    // Arrange
    let toml_str = "[toolbar]\nbehavior = \"docked-bottom\"\nmonitor = 1\n";

    // Act
    let config: Config = toml::from_str(toml_str).unwrap();

    // Assert
    assert_eq!(config.toolbar.behavior, Behavior::DockedBottom);
    assert_eq!(config.toolbar.monitor, 1);
    assert_eq!(config.toolbar.height, 56);
    assert_eq!(config.pill, PillConfig::default());
}

#[test]
fn unknown_behavior_is_rejected() {
    let result = toml::from_str::<Config>("[toolbar]\nbehavior = \"sideways\"\n");

    assert!(result.is_err());
}

#[test]
fn validate_clamps_extreme_values() {
    // Arrange
    let mut config = Config {
        toolbar: ToolbarConfig {
            height: 0,
            ..Default::default()
        },
        pill: PillConfig {
            width: 100_000,
            height: 1000,
            corner_radius: 900,
            panel_height: 10_000,
        },
        ..Default::default()
    };

    // Act
    config.validate();

    // Assert
    assert_eq!(config.toolbar.height, 16);
    assert_eq!(config.pill.width, 7680);
    assert_eq!(config.pill.height, 512);
    assert_eq!(config.pill.corner_radius, 512);
    assert_eq!(config.pill.panel_height, 4320);
}

#[test]
fn negative_radius_is_clamped_to_zero() {
    let mut config = Config {
        pill: PillConfig {
            corner_radius: -5,
            ..Default::default()
        },
        ..Default::default()
    };

    config.validate();

    assert_eq!(config.pill.corner_radius, 0);
}

#[test]
fn dock_settings_scale_the_height() {
    let toolbar = ToolbarConfig {
        behavior: Behavior::DockedTop,
        monitor: 2,
        height: 56,
    };

    let settings = toolbar.dock_settings(1.5);

    assert_eq!(
        settings,
        DockSettings {
            behavior: Behavior::DockedTop,
            monitor_index: 2,
            height: 84
        }
    );
}

#[test]
fn loads_and_validates_a_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[toolbar]\nbehavior = \"overlay\"\nheight = 4\n").unwrap();

    // Act
    let config = try_load_from(&path).unwrap();

    // Assert
    assert_eq!(config.toolbar.behavior, Behavior::Overlay);
    assert_eq!(config.toolbar.height, 16);
}

#[test]
fn missing_file_is_an_io_error_and_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(try_load_from(&path), Err(Error::Io(_))));
    assert_eq!(load_from(&path), Config::default());
}

#[test]
fn invalid_toml_names_the_file_and_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[toolbar\nheight = ").unwrap();

    let err = try_load_from(&path).unwrap_err();

    match err {
        Error::Config(message) => assert!(message.contains("config.toml")),
        other => panic!("expected a config error, got {other:?}"),
    }
    assert_eq!(load_from(&path), Config::default());
}

#[test]
fn switcher_icons_setting_drives_enumeration() {
    // Arrange
    let config: Config = toml::from_str("[switcher]\nicons = false\n").unwrap();

    // Act
    let options = config.switcher.enumerate_options();

    // Assert
    assert_eq!(options, EnumerateOptions { icons: false });
    assert!(Config::default().switcher.enumerate_options().icons);
}

#[test]
fn corner_ellipse_may_span_the_full_pill_height() {
    let mut config = Config {
        pill: PillConfig {
            width: 400,
            height: 40,
            corner_radius: 40,
            ..Default::default()
        },
        ..Default::default()
    };

    config.validate();

    assert_eq!(config.pill.corner_radius, 40);
}

#[test]
fn floating_window_leaves_room_for_the_panel() {
    // Arrange
    let mut config = Config::default();

    // Act
    let (width, height) = config.pill.window_size(1.5);

    // Assert
    assert_eq!((width, height), (1440, 750));

    config.pill.panel_height = 10;
    config.validate();
    assert_eq!(config.pill.panel_height, 68);
    assert_eq!(config.pill.window_size(1.0), (960, 68));
}
