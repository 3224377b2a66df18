//! Point scorer: maps each metric to a bucketed point contribution and
//! applies the liquidity composite, deposit-multiplicity penalty, and
//! low-payroll-confidence gate. See `spec.md` §4.3.

use crate::config::ScoringThresholds;
use crate::types::{MetricVector, PointBreakdown, TaggedTransaction};

fn points_history_days(history_days: Option<i64>, t: &ScoringThresholds) -> i32 {
    match history_days {
        Some(h) if h >= t.history_mature_days => t.points_history_mature,
        Some(h) if h >= t.history_established_days => t.points_history_established,
        _ => 0,
    }
}

fn points_overdraft_count90(count: Option<i64>, t: &ScoringThresholds) -> i32 {
    match count {
        Some(0) => t.points_overdraft_clean,
        Some(1) | Some(2) => t.points_overdraft_low,
        Some(_) => t.points_overdraft_high,
        None => 0,
    }
}

fn points_paycheck_regularity(regularity: Option<f64>, t: &ScoringThresholds) -> i32 {
    match regularity {
        Some(s) if s <= t.regularity_tight_days => t.points_regularity_tight,
        Some(s) if s <= t.regularity_loose_days => t.points_regularity_loose,
        Some(_) => t.points_regularity_poor,
        None => 0,
    }
}

fn points_days_since_last_paycheck(days: Option<i64>, t: &ScoringThresholds) -> i32 {
    match days {
        Some(d) if d <= t.days_since_paycheck_recent => t.points_paycheck_recent,
        Some(d) if d <= t.days_since_paycheck_stale => t.points_paycheck_stale,
        Some(_) => t.points_paycheck_overdue,
        None => 0,
    }
}

fn points_debt_load30(ratio: Option<f64>, t: &ScoringThresholds) -> i32 {
    match ratio {
        Some(r) if r <= t.debt_load_light => t.points_debt_light,
        Some(r) if r <= t.debt_load_moderate => t.points_debt_moderate,
        Some(_) => t.points_debt_heavy,
        None => 0,
    }
}

fn points_net_cash30(net: Option<f64>, t: &ScoringThresholds) -> i32 {
    match net {
        Some(n) if n >= 0.0 => t.points_net_cash_positive,
        Some(_) => t.points_net_cash_negative,
        None => 0,
    }
}

fn points_volatility90(vol: Option<f64>, t: &ScoringThresholds) -> i32 {
    match vol {
        Some(v) if v <= t.volatility_low => t.points_volatility_low,
        Some(v) if v <= t.volatility_moderate => t.points_volatility_moderate,
        Some(_) => t.points_volatility_high,
        None => 0,
    }
}

fn points_median_paycheck(median: Option<f64>, t: &ScoringThresholds) -> i32 {
    match median {
        Some(p) if p >= t.paycheck_strong => t.points_paycheck_strong,
        Some(p) if p >= t.paycheck_solid => t.points_paycheck_solid,
        Some(p) if p >= t.paycheck_modest => t.points_paycheck_modest,
        Some(_) => t.points_paycheck_thin,
        None => 0,
    }
}

/// Liquidity composite: combines `clean_buffer7` and `buffer_volatility`.
fn points_liquidity_composite(
    clean_buffer7: Option<f64>,
    buffer_volatility: Option<f64>,
    t: &ScoringThresholds,
) -> i32 {
    match clean_buffer7 {
        None => t.points_liquidity_thin,
        Some(c) if c < t.liquidity_buffer_adequate => t.points_liquidity_thin,
        Some(c) if c < t.liquidity_buffer_strong => t.points_liquidity_adequate,
        Some(_) => match buffer_volatility {
            Some(b) if b <= t.liquidity_volatility_calm => t.points_liquidity_calm,
            _ => t.points_liquidity_volatile_or_unknown,
        },
    }
}

fn points_deposit_multiplicity_penalty(dm: Option<f64>, t: &ScoringThresholds) -> i32 {
    match dm {
        Some(dm) if dm > t.deposit_multiplicity_ceiling => {
            t.points_deposit_multiplicity_penalty
        }
        _ => 0,
    }
}

/// `true` when payroll count > 0 and average confidence weight is below the
/// low-confidence threshold, per the spec's adopted (not the alternative
/// "all rows weight 0.2") reading.
fn low_payroll_confidence(tagged: &[TaggedTransaction], t: &ScoringThresholds) -> bool {
    let payrolls: Vec<&TaggedTransaction> = tagged.iter().filter(|tx| tx.is_payroll).collect();
    if payrolls.is_empty() {
        return false;
    }
    let avg_weight =
        payrolls.iter().map(|tx| tx.payroll_confidence_weight).sum::<f64>() / payrolls.len() as f64;
    avg_weight < t.low_confidence_avg_weight
}

/// Compute the per-metric point breakdown for a single invocation.
pub fn score_metrics(
    metrics: &MetricVector,
    tagged: &[TaggedTransaction],
    thresholds: &ScoringThresholds,
) -> PointBreakdown {
    let gate_payroll_points = low_payroll_confidence(tagged, thresholds);

    let median_paycheck = if gate_payroll_points {
        0
    } else {
        points_median_paycheck(metrics.median_paycheck, thresholds)
    };
    let paycheck_regularity = if gate_payroll_points {
        0
    } else {
        points_paycheck_regularity(metrics.paycheck_regularity, thresholds)
    };
    let days_since_last_paycheck = if gate_payroll_points {
        0
    } else {
        points_days_since_last_paycheck(metrics.days_since_last_paycheck, thresholds)
    };

    PointBreakdown {
        history_days: points_history_days(metrics.history_days, thresholds),
        overdraft_count90: points_overdraft_count90(metrics.overdraft_count90, thresholds),
        paycheck_regularity,
        days_since_last_paycheck,
        debt_load30: points_debt_load30(metrics.debt_load30, thresholds),
        net_cash30: points_net_cash30(metrics.net_cash30, thresholds),
        volatility90: points_volatility90(metrics.volatility90, thresholds),
        median_paycheck,
        liquidity_composite: points_liquidity_composite(
            metrics.clean_buffer7,
            metrics.buffer_volatility,
            thresholds,
        ),
        deposit_multiplicity_penalty: points_deposit_multiplicity_penalty(
            metrics.deposit_multiplicity30,
            thresholds,
        ),
    }
}
