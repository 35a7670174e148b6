use std::fs;
use std::path::PathBuf;

use railtone::config::{CalibrationRange, EngineConfig};
use railtone::sound::category::SoundCategory;

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "railtone_config_restore_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn assert_close(a: f32, b: f32, label: &str) {
    let diff = (a - b).abs();
    assert!(diff <= 1e-6, "{label} mismatch: {a} vs {b}");
}

fn assert_config_eq(actual: &EngineConfig, expected: &EngineConfig) {
    assert_close(
        actual.calibration.whistle.min_input,
        expected.calibration.whistle.min_input,
        "calibration.whistle.min_input",
    );
    assert_close(
        actual.calibration.whistle.max_input,
        expected.calibration.whistle.max_input,
        "calibration.whistle.max_input",
    );
    assert_close(
        actual.calibration.standard.min_input,
        expected.calibration.standard.min_input,
        "calibration.standard.min_input",
    );
    assert_close(
        actual.calibration.standard.max_input,
        expected.calibration.standard.max_input,
        "calibration.standard.max_input",
    );
    assert_eq!(
        actual.selection.horn_hit_advisory,
        expected.selection.horn_hit_advisory
    );
}

#[test]
fn config_roundtrip_default_toml() {
    let default_cfg = EngineConfig::default();
    let text = toml::to_string_pretty(&default_cfg).expect("serialize default");
    let parsed: EngineConfig = toml::from_str(&text).expect("parse default");
    assert_config_eq(&parsed, &default_cfg);
}

#[test]
fn config_load_custom_values() {
    let path = unique_path("custom.toml");
    let path_str = path.to_string_lossy().to_string();
    let mut custom = EngineConfig::default();
    custom.calibration.whistle = CalibrationRange {
        min_input: 0.4,
        max_input: 1.9,
    };
    custom.calibration.standard = CalibrationRange {
        min_input: 0.6,
        max_input: 2.2,
    };
    custom.selection.horn_hit_advisory = false;

    let text = toml::to_string_pretty(&custom).expect("serialize custom");
    fs::write(&path, text).expect("write custom config");

    let loaded = EngineConfig::load_or_default(&path_str);
    assert_config_eq(&loaded, &custom);
    assert_close(
        loaded.calibration.range_for(SoundCategory::Whistle).max_input,
        1.9,
        "range_for(whistle)",
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn config_missing_file_fallback() {
    let path = unique_path("missing.toml");
    let path_str = path.to_string_lossy().to_string();
    let _ = fs::remove_file(&path);

    let loaded = EngineConfig::load_or_default(&path_str);
    let defaults = EngineConfig::default();
    assert!(path.exists(), "missing config should be created");
    assert_config_eq(&loaded, &defaults);

    let _ = fs::remove_file(&path);
}
