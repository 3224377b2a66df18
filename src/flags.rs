//! Flag emitter: three independent early-warning booleans derived from raw
//! metrics, orthogonal to the point scorer. See `spec.md` §4.6.

use crate::types::{Flags, MetricVector};

/// Each flag depends only on the two metrics named in its rule; a `None` on
/// either side evaluates the flag to `false`, never panics or propagates
/// nullity.
pub fn emit_flags(metrics: &MetricVector) -> Flags {
    let od_vol = matches!(
        (metrics.overdraft_count90, metrics.buffer_volatility),
        (Some(count), Some(vol)) if count >= 3 && vol > 100.0
    );
    let cash_crunch = matches!(
        (metrics.net_cash30, metrics.days_since_last_paycheck),
        (Some(net), Some(days)) if net < -200.0 && days > 10
    );
    let debt_trap = matches!(
        (metrics.debt_load30, metrics.clean_buffer7),
        (Some(ratio), Some(buffer)) if ratio > 0.35 && buffer < 50.0
    );

    Flags {
        od_vol,
        cash_crunch,
        debt_trap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn od_vol_requires_both_conditions() {
        let metrics = MetricVector {
            overdraft_count90: Some(4),
            buffer_volatility: Some(150.0),
            ..Default::default()
        };
        assert!(emit_flags(&metrics).od_vol);

        let metrics = MetricVector {
            overdraft_count90: Some(2),
            buffer_volatility: Some(150.0),
            ..Default::default()
        };
        assert!(!emit_flags(&metrics).od_vol);
    }

    #[test]
    fn cash_crunch_requires_both_conditions() {
        let metrics = MetricVector {
            net_cash30: Some(-300.0),
            days_since_last_paycheck: Some(15),
            ..Default::default()
        };
        assert!(emit_flags(&metrics).cash_crunch);

        let metrics = MetricVector {
            net_cash30: Some(-300.0),
            days_since_last_paycheck: Some(5),
            ..Default::default()
        };
        assert!(!emit_flags(&metrics).cash_crunch);
    }

    #[test]
    fn debt_trap_requires_both_conditions() {
        let metrics = MetricVector {
            debt_load30: Some(0.40),
            clean_buffer7: Some(30.0),
            ..Default::default()
        };
        assert!(emit_flags(&metrics).debt_trap);

        let metrics = MetricVector {
            debt_load30: Some(0.40),
            clean_buffer7: Some(200.0),
            ..Default::default()
        };
        assert!(!emit_flags(&metrics).debt_trap);
    }

    #[test]
    fn null_metric_on_either_side_yields_false() {
        let metrics = MetricVector::default();
        let flags = emit_flags(&metrics);
        assert_eq!(flags, Flags::default());
    }
}
