//! Shared test helpers for configuration tests.

use chrono::{DateTime, TimeZone, Utc};
use ortho_config::MergeComposer;
use serde_json::Value;

use crate::config::ActionEnvironment;
use crate::SpamGuardConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Helper to compose a [`SpamGuardConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> SpamGuardConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    SpamGuardConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// A configuration naming everything needed except the pull request source.
pub fn minimal_config() -> SpamGuardConfig {
    SpamGuardConfig {
        token: Some("ghp_example".to_owned()),
        repository: Some("owner/repo".to_owned()),
        ..Default::default()
    }
}

/// An Actions environment with nothing set.
pub fn empty_actions() -> ActionEnvironment {
    ActionEnvironment::default()
}

/// Fixed clock reading in March 2026.
pub fn march_2026() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 12, 8, 30, 0)
        .single()
        .expect("test timestamp must be valid")
}
