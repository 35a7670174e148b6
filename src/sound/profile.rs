use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::curve::PitchCurve;
use crate::sound::category::SoundCategory;

/// A named configuration for one sound category. Absent fields leave the
/// corresponding live parameter unmodified when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioProfile {
    pub name: String,
    pub category: SoundCategory,
    #[serde(default)]
    pub pitch: Option<f32>,
    #[serde(default)]
    pub max_volume: Option<f32>,
    #[serde(default)]
    pub pitch_curve: Option<PitchCurve>,
}

impl AudioProfile {
    pub fn new(name: impl Into<String>, category: SoundCategory) -> Self {
        Self {
            name: name.into(),
            category,
            pitch: None,
            max_volume: None,
            pitch_curve: None,
        }
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn with_max_volume(mut self, max_volume: f32) -> Self {
        self.max_volume = Some(max_volume);
        self
    }

    pub fn with_curve(mut self, curve: PitchCurve) -> Self {
        self.pitch_curve = Some(curve);
        self
    }
}

/// Per-entity profile assignment: at most one profile per category, plus a
/// side table for generic clip-name profiles that bypass category
/// classification. Absence of a slot means "default behavior".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSet {
    slots: BTreeMap<SoundCategory, AudioProfile>,
    generic: BTreeMap<String, AudioProfile>,
    pub customized: bool,
}

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: SoundCategory) -> Option<&AudioProfile> {
        self.slots.get(&category)
    }

    /// Insert under the profile's own category, replacing any previous
    /// profile for that category.
    pub fn set(&mut self, profile: AudioProfile) {
        self.slots.insert(profile.category, profile);
    }

    pub fn get_generic(&self, clip_name: &str) -> Option<&AudioProfile> {
        self.generic.get(clip_name)
    }

    pub fn set_generic(&mut self, clip_name: impl Into<String>, profile: AudioProfile) {
        self.generic.insert(clip_name.into(), profile);
    }

    pub fn categories(&self) -> impl Iterator<Item = SoundCategory> + '_ {
        self.slots.keys().copied()
    }
}
