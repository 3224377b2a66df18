//! Recommendation gate: combines the normalized Blink Score with observed
//! history length into an approve/reject decision. See `spec.md` §4.5.

use crate::types::Recommendation;

/// Three-tier, history-length-dependent approval threshold. `history_days`
/// below 90 is not handled here — the engine's top-level pipeline returns
/// `EngineError::InsufficientHistory` before this gate ever runs.
pub fn recommend(blink_score: f64, history_days: i64) -> Recommendation {
    let approved = match history_days {
        90..=179 => blink_score >= 88.0,
        180..=364 => blink_score >= 80.0,
        d if d >= 365 => blink_score >= 73.0,
        _ => false,
    };
    if approved {
        Recommendation::Approved
    } else {
        Recommendation::Rejected
    }
}
