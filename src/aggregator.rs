//! Window aggregator: turns tagged transactions and the daily balance series
//! into the eleven-metric [`MetricVector`]. See `spec.md` §4.2.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calendar::{inclusive_days_between, Window};
use crate::stats::{mean, sample_stddev, weighted_median, weighted_stddev};
use crate::types::{DailyBalance, MetricVector, ReportContext, TaggedTransaction};

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse::<f64>().unwrap_or(0.0)
}

/// Normalized counterparty key: merchant name if present, else the first 16
/// characters of the raw description, else `"Unknown"`; trimmed and
/// upper-cased.
fn counterparty_key(t: &TaggedTransaction) -> String {
    let raw = t
        .transaction
        .merchant_name
        .clone()
        .or_else(|| {
            t.transaction
                .raw_description
                .as_ref()
                .map(|d| d.chars().take(16).collect::<String>())
        })
        .unwrap_or_else(|| "Unknown".to_string());
    raw.trim().to_uppercase()
}

/// Per-day net cash contribution: positive for net inflow, negative for net
/// outflow, pre-initialized to zero for every day in `[t0 - (history_days-1), t0]`.
fn daily_net_cash_map(
    tagged: &[TaggedTransaction],
    t0: NaiveDate,
    history_days: i64,
) -> HashMap<NaiveDate, f64> {
    let mut map = HashMap::new();
    let start = t0 - chrono::Duration::days(history_days - 1);
    let mut day = start;
    while day <= t0 {
        map.insert(day, 0.0);
        day += chrono::Duration::days(1);
    }
    for t in tagged {
        let contribution = if t.transaction.is_inflow() {
            to_f64(-t.amount())
        } else {
            -to_f64(t.amount())
        };
        if let Some(entry) = map.get_mut(&t.date()) {
            *entry += contribution;
        }
    }
    map
}

fn windowed_daily_values(map: &HashMap<NaiveDate, f64>, window: Window) -> Vec<f64> {
    let mut day = window.start;
    let mut values = Vec::new();
    while day <= window.end {
        if let Some(v) = map.get(&day) {
            values.push(*v);
        }
        day += chrono::Duration::days(1);
    }
    values
}

/// Build the forward-filled 7-day balance buffer `[T0-6 .. T0]`. Per the
/// spec's preserved source ambiguity, the lookup table is built from up to
/// 10 trailing days of historical balance even though only 7 feed the
/// output — this is intentional, not a bug.
fn forward_filled_buffer(
    balances: &[DailyBalance],
    context: &ReportContext,
) -> Option<Vec<f64>> {
    let current_balance = context.current_balance?;

    let lookback_start = context.t0 - chrono::Duration::days(10);
    let lookback_end = context.t0 - chrono::Duration::days(1);
    let mut by_day: HashMap<NaiveDate, f64> = balances
        .iter()
        .filter(|b| b.date >= lookback_start && b.date <= lookback_end)
        .map(|b| (b.date, to_f64(b.balance)))
        .collect();
    by_day.insert(context.t0, to_f64(current_balance));

    let mut reversed = Vec::with_capacity(7);
    let mut last_known = to_f64(current_balance);
    let mut day = context.t0;
    for _ in 0..7 {
        if let Some(balance) = by_day.get(&day) {
            last_known = *balance;
        }
        reversed.push(last_known);
        day -= chrono::Duration::days(1);
    }
    reversed.reverse();
    Some(reversed)
}

fn history_days(tagged: &[TaggedTransaction], t0: NaiveDate) -> Option<i64> {
    tagged
        .iter()
        .map(|t| t.date())
        .min()
        .map(|earliest| inclusive_days_between(earliest, t0))
}

fn median_paycheck(tagged: &[TaggedTransaction]) -> Option<f64> {
    let samples: Vec<(f64, f64)> = tagged
        .iter()
        .filter(|t| t.is_payroll)
        .map(|t| (to_f64(-t.amount()).abs(), t.payroll_confidence_weight))
        .collect();
    weighted_median(samples)
}

fn paycheck_regularity(tagged: &[TaggedTransaction], t0: NaiveDate) -> Option<f64> {
    let window = Window::ending(t0, 180);
    let mut payrolls: Vec<&TaggedTransaction> = tagged
        .iter()
        .filter(|t| t.is_payroll && window.contains(t.date()))
        .collect();
    payrolls.sort_by_key(|t| t.date());

    let positive_count = payrolls
        .iter()
        .filter(|t| t.payroll_confidence_weight > 0.0)
        .count();
    if positive_count < 2 {
        return None;
    }

    let gap_samples: Vec<(f64, f64)> = payrolls
        .windows(2)
        .filter_map(|pair| {
            let weight = pair[0].payroll_confidence_weight.min(pair[1].payroll_confidence_weight);
            if weight <= 0.0 {
                return None;
            }
            let gap = (pair[1].date() - pair[0].date()).num_days() as f64;
            Some((gap, weight))
        })
        .collect();

    weighted_stddev(&gap_samples)
}

fn days_since_last_paycheck(tagged: &[TaggedTransaction], t0: NaiveDate) -> Option<i64> {
    tagged
        .iter()
        .filter(|t| t.is_payroll && t.payroll_confidence_weight >= 0.5)
        .map(|t| t.date())
        .max()
        .map(|latest| (t0 - latest).num_days())
}

fn overdraft_count90(tagged: &[TaggedTransaction], t0: NaiveDate) -> i64 {
    let window = Window::ending(t0, 90);
    tagged
        .iter()
        .filter(|t| t.is_odfee && window.contains(t.date()))
        .count() as i64
}

fn deposit_multiplicity30(tagged: &[TaggedTransaction], t0: NaiveDate) -> f64 {
    let window = Window::ending(t0, 30);
    let in_window: Vec<&TaggedTransaction> = tagged
        .iter()
        .filter(|t| window.contains(t.date()))
        .collect();

    let unique_counterparties: std::collections::HashSet<String> = in_window
        .iter()
        .filter(|t| t.transaction.is_inflow())
        .map(|t| counterparty_key(t))
        .collect();

    let payroll_events = in_window.iter().filter(|t| t.is_payroll).count();
    unique_counterparties.len() as f64 / (payroll_events.max(1) as f64)
}

fn debt_load30(tagged: &[TaggedTransaction], t0: NaiveDate) -> Option<f64> {
    let window = Window::ending(t0, 30);
    let in_window: Vec<&TaggedTransaction> = tagged
        .iter()
        .filter(|t| window.contains(t.date()))
        .collect();

    let loan_outflows: f64 = in_window
        .iter()
        .filter(|t| t.is_loanpay)
        .map(|t| to_f64(t.amount()))
        .sum();
    let inflow_magnitude: f64 = in_window
        .iter()
        .filter(|t| t.transaction.is_inflow())
        .map(|t| to_f64(-t.amount()))
        .sum();

    if inflow_magnitude == 0.0 {
        None
    } else {
        Some(loan_outflows / inflow_magnitude)
    }
}

fn volatility90(net_cash_map: &HashMap<NaiveDate, f64>, t0: NaiveDate) -> Option<f64> {
    let window = Window::ending(t0, 90);
    let values = windowed_daily_values(net_cash_map, window);
    if values.len() < 2 {
        return None;
    }
    let stddev = sample_stddev(&values)?;
    let abs_values: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    let mean_abs = mean(&abs_values)?;

    if stddev == 0.0 && mean_abs == 0.0 {
        Some(0.0)
    } else if mean_abs < 0.01 && stddev > 0.0 {
        None
    } else {
        Some(stddev / mean_abs)
    }
}

/// Derive the full [`MetricVector`] from tagged transactions, the daily
/// balance series, and the report context.
pub fn aggregate(
    tagged: &[TaggedTransaction],
    balances: &[DailyBalance],
    context: &ReportContext,
) -> MetricVector {
    let t0 = context.t0;
    let history = history_days(tagged, t0);

    let net_cash_map = history
        .map(|h| daily_net_cash_map(tagged, t0, h))
        .unwrap_or_default();

    let net_cash30 = history.map(|_| {
        windowed_daily_values(&net_cash_map, Window::ending(t0, 30))
            .iter()
            .sum::<f64>()
    });

    let buffer = forward_filled_buffer(balances, context);
    let clean_buffer7 = buffer.as_ref().and_then(|values| {
        values.iter().cloned().min_by(|a, b| a.partial_cmp(b).unwrap())
    });
    let buffer_volatility = buffer.as_ref().and_then(|values| sample_stddev(values));

    MetricVector {
        history_days: history,
        median_paycheck: median_paycheck(tagged),
        paycheck_regularity: paycheck_regularity(tagged, t0),
        days_since_last_paycheck: days_since_last_paycheck(tagged, t0),
        overdraft_count90: Some(overdraft_count90(tagged, t0)),
        clean_buffer7,
        buffer_volatility,
        deposit_multiplicity30: Some(deposit_multiplicity30(tagged, t0)),
        net_cash30,
        debt_load30: debt_load30(tagged, t0),
        volatility90: volatility90(&net_cash_map, t0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::tag_transactions_at;
    use crate::types::{OverrideMap, Transaction};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn biweekly_payrolls(count: i64, start: NaiveDate) -> Vec<Transaction> {
        (0..count)
            .map(|i| {
                Transaction::new(
                    format!("pay{i}"),
                    start + chrono::Duration::days(14 * i),
                    dec!(-2000.00),
                )
                .with_merchant("ADP PAYROLL")
                .with_category_path(vec!["Payroll".into()])
            })
            .collect()
    }

    #[test]
    fn history_days_spans_earliest_to_t0_inclusive() {
        let t0 = date(2025, 5, 1);
        let txs = vec![Transaction::new("1", date(2025, 1, 1), dec!(-100.00))];
        let tagged = tag_transactions_at(&txs, &OverrideMap::new(), t0, &Default::default());
        let metrics = aggregate(&tagged, &[], &ReportContext::new(t0));
        assert_eq!(metrics.history_days, Some(121));
    }

    #[test]
    fn median_paycheck_uses_all_history_not_just_window() {
        let t0 = date(2025, 5, 1);
        let txs = biweekly_payrolls(12, date(2025, 1, 1));
        let tagged = tag_transactions_at(&txs, &OverrideMap::new(), t0, &Default::default());
        let metrics = aggregate(&tagged, &[], &ReportContext::new(t0));
        assert_eq!(metrics.median_paycheck, Some(2000.0));
    }

    #[test]
    fn clean_buffer7_null_without_current_balance() {
        let t0 = date(2025, 5, 1);
        let metrics = aggregate(&[], &[], &ReportContext::new(t0));
        assert_eq!(metrics.clean_buffer7, None);
        assert_eq!(metrics.buffer_volatility, None);
    }

    #[test]
    fn clean_buffer7_is_min_of_forward_filled_week() {
        let t0 = date(2025, 5, 1);
        let balances = vec![
            DailyBalance::new(date(2025, 4, 28), dec!(100.00)),
            DailyBalance::new(date(2025, 4, 25), dec!(50.00)),
        ];
        let context = ReportContext::new(t0).with_current_balance(dec!(200.00));
        let metrics = aggregate(&[], &balances, &context);
        // days T0..T0-6 = Apr25..May1; Apr25=50 fwd-fills Apr26,27; Apr28=100 fills
        // Apr29,30; T0=May1=200.
        assert_eq!(metrics.clean_buffer7, Some(50.0));
    }

    #[test]
    fn debt_load_null_when_no_inflows_in_window() {
        let t0 = date(2025, 5, 1);
        let txs = vec![Transaction::new("1", date(2025, 4, 20), dec!(50.00))
            .with_description("LOAN PAYMENT")];
        let tagged = tag_transactions_at(&txs, &OverrideMap::new(), t0, &Default::default());
        let metrics = aggregate(&tagged, &[], &ReportContext::new(t0));
        assert_eq!(metrics.debt_load30, None);
    }

    #[test]
    fn volatility90_zero_stddev_below_cent_mean_is_zero_not_null() {
        let t0 = date(2025, 5, 1);
        let mut map = HashMap::new();
        map.insert(t0, 0.005);
        map.insert(t0 - chrono::Duration::days(1), 0.005);
        assert_eq!(volatility90(&map, t0), Some(0.0));
    }

    #[test]
    fn volatility90_null_when_mean_below_cent_and_stddev_positive() {
        let t0 = date(2025, 5, 1);
        let mut map = HashMap::new();
        map.insert(t0, 0.009);
        map.insert(t0 - chrono::Duration::days(1), 0.0);
        assert_eq!(volatility90(&map, t0), None);
    }

    #[test]
    fn windowing_unaffected_by_transactions_outside_window() {
        let t0 = date(2025, 5, 1);
        let inside = Transaction::new("1", date(2025, 4, 20), dec!(35.00))
            .with_category_id("22001000");
        let mut with_outside = vec![inside.clone()];
        with_outside.push(
            Transaction::new("2", date(2024, 1, 1), dec!(35.00)).with_category_id("22001000"),
        );

        let tagged_base = tag_transactions_at(&[inside], &OverrideMap::new(), t0, &Default::default());
        let tagged_extra =
            tag_transactions_at(&with_outside, &OverrideMap::new(), t0, &Default::default());

        let base = aggregate(&tagged_base, &[], &ReportContext::new(t0));
        let extra = aggregate(&tagged_extra, &[], &ReportContext::new(t0));
        assert_eq!(base.overdraft_count90, extra.overdraft_count90);
    }
}
