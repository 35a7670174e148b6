use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::sound::category::SoundCategory;

/// Calibration range used to normalize a raw continuous input before curve
/// evaluation. Whistle-family parts ride a narrower range than the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRange {
    pub min_input: f32,
    pub max_input: f32,
}

impl CalibrationRange {
    pub fn span(&self) -> f32 {
        self.max_input - self.min_input
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default = "CalibrationConfig::default_whistle")]
    pub whistle: CalibrationRange,
    #[serde(default = "CalibrationConfig::default_standard")]
    pub standard: CalibrationRange,
}

impl CalibrationConfig {
    fn default_whistle() -> CalibrationRange {
        CalibrationRange {
            min_input: 0.5,
            max_input: 1.8,
        }
    }
    fn default_standard() -> CalibrationRange {
        CalibrationRange {
            min_input: 0.5,
            max_input: 2.0,
        }
    }

    pub fn range_for(&self, category: SoundCategory) -> CalibrationRange {
        match category {
            SoundCategory::Whistle => self.whistle,
            _ => self.standard,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            whistle: Self::default_whistle(),
            standard: Self::default_standard(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Show the advisory line when choosing a horn-hit profile.
    #[serde(default = "SelectionConfig::default_horn_hit_advisory")]
    pub horn_hit_advisory: bool,
}

impl SelectionConfig {
    fn default_horn_hit_advisory() -> bool {
        true
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            horn_hit_advisory: Self::default_horn_hit_advisory(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl EngineConfig {
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        if let Ok(text) = toml::to_string_pretty(&default_cfg) {
            if let Err(err) = fs::write(path_obj, text) {
                eprintln!("Failed to write default config {path}: {err}.");
            }
        }
        default_cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_ranges() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.calibration.whistle.min_input, 0.5);
        assert_eq!(cfg.calibration.whistle.max_input, 1.8);
        assert_eq!(cfg.calibration.standard.max_input, 2.0);
        assert!(cfg.selection.horn_hit_advisory);
    }

    #[test]
    fn whistle_gets_its_own_range() {
        let cfg = CalibrationConfig::default();
        assert_eq!(cfg.range_for(SoundCategory::Whistle).max_input, 1.8);
        assert_eq!(cfg.range_for(SoundCategory::Bell).max_input, 2.0);
    }

    #[test]
    fn partial_toml_fills_missing_sections() {
        let cfg: EngineConfig =
            toml::from_str("[calibration.whistle]\nmin_input = 0.4\nmax_input = 1.9\n")
                .expect("parse partial config");
        assert_eq!(cfg.calibration.whistle.min_input, 0.4);
        assert_eq!(cfg.calibration.standard.min_input, 0.5);
        assert!(cfg.selection.horn_hit_advisory);
    }
}
