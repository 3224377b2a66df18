//! Tunable configuration for the scoring engine.
//!
//! The engine's *algorithm* — window definitions, formulas, the bucket and
//! gating logic in `spec.md` §4 — never changes based on configuration.
//! What's configurable is the numeric/lexical constants those rules use:
//! bucket cut-offs, point values, and keyword lists. Every field has a
//! `Default` that reproduces the spec's literal values exactly.

mod core;
mod loader;
mod scoring;
mod tagger;

pub use core::BlinkConfig;
pub use loader::load_config;
pub use scoring::ScoringThresholds;
pub use tagger::TaggerConfig;
