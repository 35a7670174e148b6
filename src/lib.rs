//! Per-vehicle audio customization engine.
//!
//! Classifies audio-emitting components into semantic sound categories,
//! memoizes resolution per component identity, evaluates per-category pitch
//! response curves, and drives the interactive point/choose/confirm
//! selection workflow. The host owns the frame loop, rendering, persistence
//! and asset loading; it talks to this crate through the hook surface on
//! [`sound::engine::SoundCustomizer`] and the collaborator traits in
//! [`sound::host`].

pub mod config;
pub mod core;
pub mod sound;
