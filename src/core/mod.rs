//! Semantic-free primitives (normalized parameters, curves).

pub mod curve;
