//! Blink Score: a deterministic feature-engineering and scoring engine for
//! consumer credit risk from recent bank-transaction history.
//!
//! The engine is a pure function — no I/O, no shared mutable state, no
//! suspension points — so invocations are trivially parallelizable and
//! safe to share across threads. Its six stages run strictly linearly:
//!
//! 1. [`tagger`] — heuristic transaction classification (payroll / loan
//!    payment / overdraft fee) plus the cadence-detector post-pass.
//! 2. [`aggregator`] — the eleven-metric [`types::MetricVector`] over fixed
//!    lookback windows.
//! 3. [`scoring`] — bucketed point contributions, liquidity composite,
//!    deposit-multiplicity penalty, and the low-payroll-confidence gate.
//! 4. [`normalizer`] — sum to `base_score`, then the affine transform into
//!    the public Blink Score.
//! 5. [`recommendation`] — the history-length-gated approve/reject decision.
//! 6. [`flags`] — three independent early-warning booleans.
//!
//! [`engine::score`] wires all six into the single public entry point.

pub mod aggregator;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod flags;
pub mod normalizer;
pub mod recommendation;
pub mod scoring;
pub mod stats;
pub mod tagger;
pub mod types;

pub use config::{load_config, BlinkConfig, ScoringThresholds, TaggerConfig};
pub use engine::{score, score_with_config, tag_transactions, ScoringRequest};
pub use error::{EngineError, Result};
pub use types::{
    DailyBalance, Flags, MetricVector, OverrideMap, PointBreakdown, Recommendation, ReportContext,
    ScoreResult, TaggedTransaction, Transaction, TransactionOverride,
};
