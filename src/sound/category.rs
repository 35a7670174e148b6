use serde::{Deserialize, Serialize};

/// Semantic role of an audio-emitting part. Closed set, fixed at process
/// start; `Unspecified` is the designated "classification failed" result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCategory {
    HornHit,
    HornLoop,
    Whistle,
    Bell,
    AirCompressor,
    EngineStartup,
    EngineShutdown,
    Dynamo,
    Unspecified,
}

impl SoundCategory {
    /// Every real category, in deterministic enumeration order. Excludes
    /// `Unspecified`.
    pub const ALL: [SoundCategory; 8] = [
        SoundCategory::HornHit,
        SoundCategory::HornLoop,
        SoundCategory::Whistle,
        SoundCategory::Bell,
        SoundCategory::AirCompressor,
        SoundCategory::EngineStartup,
        SoundCategory::EngineShutdown,
        SoundCategory::Dynamo,
    ];

    pub fn is_specified(self) -> bool {
        self != SoundCategory::Unspecified
    }

    /// Display label used by the selection workflow.
    pub fn label(self) -> &'static str {
        match self {
            SoundCategory::HornHit => "Horn (hit)",
            SoundCategory::HornLoop => "Horn (loop)",
            SoundCategory::Whistle => "Whistle",
            SoundCategory::Bell => "Bell",
            SoundCategory::AirCompressor => "Air compressor",
            SoundCategory::EngineStartup => "Engine startup",
            SoundCategory::EngineShutdown => "Engine shutdown",
            SoundCategory::Dynamo => "Dynamo",
            SoundCategory::Unspecified => "Unspecified",
        }
    }
}

/// Match a lowercased clip or component name against the ordered heuristic
/// rules. First rule that matches wins; the order is part of the contract
/// and must not be shuffled.
pub fn match_name(name: &str) -> SoundCategory {
    let name = name.to_ascii_lowercase();
    let has = |needle: &str| name.contains(needle);

    if has("horn") && (has("hit") || has("pulse")) {
        SoundCategory::HornHit
    } else if has("horn") {
        SoundCategory::HornLoop
    } else if has("whistle") {
        SoundCategory::Whistle
    } else if has("bell") {
        SoundCategory::Bell
    } else if has("compressor") || (has("air") && has("pump")) {
        SoundCategory::AirCompressor
    } else if has("engine") && (has("startup") || has("start")) {
        SoundCategory::EngineStartup
    } else if has("engine") && (has("shutdown") || has("stop")) {
        SoundCategory::EngineShutdown
    } else if has("dynamo") {
        SoundCategory::Dynamo
    } else {
        SoundCategory::Unspecified
    }
}
