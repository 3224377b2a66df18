//! Top-level engine entry point: wires tagger → aggregator → scorer →
//! normalizer → (recommendation, flags) into the single public `score`
//! function. See `spec.md` §2 and §6.

use serde::{Deserialize, Serialize};

use crate::aggregator::aggregate;
use crate::config::BlinkConfig;
use crate::error::{EngineError, Result};
use crate::flags::emit_flags;
use crate::normalizer::{base_score, blink_score};
use crate::recommendation::recommend;
use crate::scoring::score_metrics;
use crate::tagger::tag_transactions_at;
use crate::types::{
    DailyBalance, OverrideMap, PointBreakdown, ReportContext, ScoreResult, TaggedTransaction,
    Transaction,
};

/// Tag every transaction without running the rest of the pipeline. Exposed
/// standalone for callers that only need tagging — e.g. an admin UI that
/// previews classification before the full engine runs — mirroring the
/// teacher's pattern of exposing sub-pipeline stages as public functions
/// alongside the top-level one.
pub fn tag_transactions(
    transactions: &[Transaction],
    overrides: &OverrideMap,
    context: &ReportContext,
    config: &BlinkConfig,
) -> Vec<TaggedTransaction> {
    tag_transactions_at(transactions, overrides, context.t0, &config.tagger)
}

/// Run the full scoring pipeline with the spec-literal default configuration.
pub fn score(
    transactions: &[Transaction],
    balances: &[DailyBalance],
    context: &ReportContext,
    overrides: &OverrideMap,
) -> Result<ScoreResult> {
    score_with_config(
        transactions,
        balances,
        context,
        overrides,
        &BlinkConfig::default(),
    )
}

/// Run the full scoring pipeline with an explicit, operator-tunable
/// configuration. The algorithm itself never varies with `config`; only the
/// numeric/lexical constants it carries do.
pub fn score_with_config(
    transactions: &[Transaction],
    balances: &[DailyBalance],
    context: &ReportContext,
    overrides: &OverrideMap,
    config: &BlinkConfig,
) -> Result<ScoreResult> {
    let tagged = tag_transactions_at(transactions, overrides, context.t0, &config.tagger);

    let history_days = tagged
        .iter()
        .map(|t| t.date())
        .min()
        .map(|earliest| (context.t0 - earliest).num_days() + 1);

    let history_days = match history_days {
        Some(days) if days >= 90 => days,
        Some(days) => return Err(EngineError::InsufficientHistory { history_days: days }),
        None => return Err(EngineError::InsufficientHistory { history_days: 0 }),
    };

    let metrics = aggregate(&tagged, balances, context);
    let points: PointBreakdown = score_metrics(&metrics, &tagged, &config.scoring);
    let base = base_score(&points);
    let score = blink_score(base, &config.scoring);
    let recommendation = recommend(score, history_days);
    let flags = emit_flags(&metrics);

    Ok(ScoreResult {
        metrics,
        points,
        base_score: base,
        blink_score: score,
        recommendation,
        flags,
        tagged_transactions: tagged,
    })
}

/// A fully deserializable scoring request, matching the Bundle I/O layer a
/// host process sends the CLI or library: transactions, the daily balance
/// series, the report context, and any per-transaction overrides. Pure
/// serde plumbing; it carries no scoring logic of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub balances: Vec<DailyBalance>,
    pub context: ReportContext,
    #[serde(default)]
    pub overrides: OverrideMap,
}

impl ScoringRequest {
    /// Run the engine over this request with the given configuration.
    pub fn score(&self, config: &BlinkConfig) -> Result<ScoreResult> {
        score_with_config(
            &self.transactions,
            &self.balances,
            &self.context,
            &self.overrides,
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// S1 — Clean prime user: 12 biweekly $2000 ADP payrolls, flat $1200
    /// balance, no overdrafts or loan outflows, two $300 grocery outflows a
    /// month. Expect a high score, `approved`, all flags false.
    #[test]
    fn s1_clean_prime_user_is_approved_with_no_flags() {
        let t0 = date(2025, 5, 1);
        let mut transactions = Vec::new();
        let mut pay_date = date(2025, 4, 28);
        for i in 0..12 {
            transactions.push(
                Transaction::new(format!("pay{i}"), pay_date, dec!(-2000.00))
                    .with_merchant("ADP PAYROLL")
                    .with_category_path(vec!["Income".into(), "Payroll".into()])
                    .with_category_id("21006000"),
            );
            pay_date -= chrono::Duration::days(14);
        }
        let mut groceries_date = date(2025, 4, 15);
        for i in 0..4 {
            transactions.push(
                Transaction::new(format!("groc{i}"), groceries_date, dec!(300.00))
                    .with_merchant("WHOLE FOODS"),
            );
            groceries_date -= chrono::Duration::days(15);
        }

        let mut balances = Vec::new();
        let mut d = t0 - chrono::Duration::days(10);
        while d <= t0 {
            balances.push(DailyBalance::new(d, dec!(1200.00)));
            d += chrono::Duration::days(1);
        }

        let context = ReportContext::new(t0).with_current_balance(dec!(1200.00));
        let result = score(&transactions, &balances, &context, &OverrideMap::new()).unwrap();

        assert_eq!(result.metrics.median_paycheck, Some(2000.0));
        assert_eq!(result.metrics.overdraft_count90, Some(0));
        assert_eq!(result.metrics.debt_load30, None);
        assert!(result.blink_score >= 88.0);
        assert_eq!(result.recommendation, crate::types::Recommendation::Approved);
        assert!(!result.flags.od_vol);
        assert!(!result.flags.cash_crunch);
        assert!(!result.flags.debt_trap);
    }

    /// S2 — Insufficient history: only 60 days of transactions.
    #[test]
    fn s2_insufficient_history_is_rejected_without_score() {
        let t0 = date(2025, 5, 1);
        let transactions = vec![Transaction::new(
            "1",
            t0 - chrono::Duration::days(59),
            dec!(-500.00),
        )];
        let err = score(
            &transactions,
            &[],
            &ReportContext::new(t0),
            &OverrideMap::new(),
        )
        .unwrap_err();
        match err {
            EngineError::InsufficientHistory { history_days } => assert_eq!(history_days, 60),
            other => panic!("expected InsufficientHistory, got {other:?}"),
        }
    }

    /// S3 — Overdraft-volatile: 4 overdraft fees in the last 90 days, daily
    /// balances oscillating wildly over the last 7 days.
    #[test]
    fn s3_overdraft_volatile_raises_od_vol_flag() {
        let t0 = date(2025, 5, 1);
        let mut transactions = vec![Transaction::new(
            "anchor",
            t0 - chrono::Duration::days(364),
            dec!(-1000.00),
        )];
        for i in 0..4 {
            transactions.push(
                Transaction::new(
                    format!("od{i}"),
                    t0 - chrono::Duration::days(10 * i),
                    dec!(35.00),
                )
                .with_category_id("22001000"),
            );
        }

        let mut balances = Vec::new();
        for i in 0..7i64 {
            let balance = if i % 2 == 0 { dec!(400.00) } else { dec!(20.00) };
            balances.push(DailyBalance::new(t0 - chrono::Duration::days(i), balance));
        }

        let context = ReportContext::new(t0).with_current_balance(dec!(400.00));
        let result = score(&transactions, &balances, &context, &OverrideMap::new()).unwrap();

        assert_eq!(result.metrics.overdraft_count90, Some(4));
        assert!(result.metrics.buffer_volatility.unwrap() > 100.0);
        assert!(result.flags.od_vol);
        assert_eq!(result.points.overdraft_count90, -15);
    }

    /// S5 — Low payroll confidence: three keyword-only inflows (weight 0.2
    /// each), average 0.2 < 0.25. The three gated point fields must be zero
    /// even though the metrics themselves stay populated.
    #[test]
    fn s5_low_payroll_confidence_gates_points_not_metrics() {
        let t0 = date(2025, 5, 1);
        let mut transactions = vec![Transaction::new(
            "anchor",
            t0 - chrono::Duration::days(200),
            dec!(10.00),
        )];
        let mut d = t0 - chrono::Duration::days(60);
        for i in 0..3 {
            transactions.push(
                Transaction::new(format!("pay{i}"), d, dec!(-900.00)).with_description("ADP"),
            );
            d += chrono::Duration::days(20);
        }

        let result = score(
            &transactions,
            &[],
            &ReportContext::new(t0),
            &OverrideMap::new(),
        )
        .unwrap();

        assert!(result.metrics.median_paycheck.is_some());
        assert_eq!(result.points.median_paycheck, 0);
        assert_eq!(result.points.paycheck_regularity, 0);
        assert_eq!(result.points.days_since_last_paycheck, 0);
    }

    /// S6 — Override flip: S1 with the most recent payroll overridden to
    /// `is_payroll=false`. `days_since_last_paycheck` should recompute from
    /// the prior reliable paycheck.
    #[test]
    fn s6_override_flip_recomputes_days_since_last_paycheck() {
        let t0 = date(2025, 5, 1);
        let mut transactions = Vec::new();
        let mut pay_date = date(2025, 4, 28);
        for i in 0..12 {
            transactions.push(
                Transaction::new(format!("pay{i}"), pay_date, dec!(-2000.00))
                    .with_merchant("ADP PAYROLL")
                    .with_category_path(vec!["Income".into(), "Payroll".into()])
                    .with_category_id("21006000"),
            );
            pay_date -= chrono::Duration::days(14);
        }

        let mut overrides = OverrideMap::new();
        overrides.insert(
            "pay0".into(),
            crate::types::TransactionOverride {
                is_payroll: Some(false),
                is_loanpay: None,
            },
        );

        let context = ReportContext::new(t0).with_current_balance(dec!(1200.00));
        let result = score(&transactions, &[], &context, &overrides).unwrap();

        assert_eq!(result.metrics.days_since_last_paycheck, Some(17));
        assert_eq!(result.points.days_since_last_paycheck, -10);
    }
}
