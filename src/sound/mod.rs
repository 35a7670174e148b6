//! The sound customization engine: classification, resolution caching,
//! curve evaluation, profile application, and the selection workflow.

pub mod adapters;
pub mod apply;
pub mod cache;
pub mod category;
pub mod classify;
pub mod curve;
pub mod engine;
pub mod host;
pub mod profile;
pub mod select;

#[cfg(test)]
mod tests;
