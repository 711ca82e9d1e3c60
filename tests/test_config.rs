//! Tests for loading and validating navigator configuration.

use cx_navigator::simulation::{ConfigError, ExplorationKind, Navigator, NavigatorConfig};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_json_file_round_trip() {
    let config = NavigatorConfig {
        arena_size: 60.0,
        nest: Some([10.0, 20.0]),
        discovery_times: vec![5.0, 15.0, 40.0],
        exploration: ExplorationKind::RandomWalk,
        seed: Some(99),
        ..NavigatorConfig::default()
    };

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string_pretty(&config).unwrap().as_bytes())
        .unwrap();

    let loaded = NavigatorConfig::from_json_file(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_json_takes_defaults() {
    let config =
        NavigatorConfig::from_json_str(r#"{ "speed": 2.0, "exploration": "random_walk" }"#)
            .unwrap();
    assert_eq!(config.speed, 2.0);
    assert_eq!(config.exploration, ExplorationKind::RandomWalk);
    assert_eq!(config.heading_neurons, 8);
    assert_eq!(config.integrator_neurons, 16);
    assert_eq!(config.nest_position(), (50.0, 50.0));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = NavigatorConfig::from_json_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let result = NavigatorConfig::from_json_str("{ speed: ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        NavigatorConfig {
            arena_size: 0.0,
            ..NavigatorConfig::default()
        },
        NavigatorConfig {
            heading_neurons: 0,
            ..NavigatorConfig::default()
        },
        NavigatorConfig {
            memory_capacity: 0,
            ..NavigatorConfig::default()
        },
        NavigatorConfig {
            integrator_noise: -0.1,
            ..NavigatorConfig::default()
        },
        NavigatorConfig {
            integrator_decay: 1.0,
            ..NavigatorConfig::default()
        },
        NavigatorConfig {
            nest: Some([150.0, 10.0]),
            ..NavigatorConfig::default()
        },
        NavigatorConfig {
            discovery_times: vec![20.0, 10.0],
            ..NavigatorConfig::default()
        },
        NavigatorConfig {
            dt: f64::NAN,
            ..NavigatorConfig::default()
        },
    ];

    for config in cases {
        let result = Navigator::new(config.clone());
        assert!(
            matches!(result, Err(ConfigError::Invalid(_))),
            "accepted invalid config: {config:?}"
        );
    }
}

#[test]
fn test_error_messages_name_the_problem() {
    let err = NavigatorConfig {
        memory_capacity: 0,
        ..NavigatorConfig::default()
    }
    .validate()
    .unwrap_err();
    assert!(err.to_string().contains("memory_capacity"));
}
