//! Data model shared by every stage of the scoring pipeline.
//!
//! Every type here is immutable once constructed by the caller: the engine
//! produces a new [`ScoreResult`] per invocation and never mutates an input
//! in place.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single posted bank transaction.
///
/// Inflow = credit to the account = negative `amount`. Outflow = debit =
/// positive `amount`. This sign convention runs through the whole engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub raw_description: Option<String>,
    /// Ordered category path, e.g. `["Income", "Payroll"]`.
    #[serde(default)]
    pub category_path: Vec<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            merchant_name: None,
            raw_description: None,
            category_path: Vec::new(),
            category_id: None,
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant_name = Some(merchant.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.raw_description = Some(description.into());
        self
    }

    pub fn with_category_path(mut self, path: Vec<String>) -> Self {
        self.category_path = path;
        self
    }

    pub fn with_category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn is_inflow(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn is_outflow(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// End-of-day balance for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub balance: Decimal,
}

impl DailyBalance {
    pub fn new(date: NaiveDate, balance: Decimal) -> Self {
        Self { date, balance }
    }
}

/// Per-invocation context: the reference date and (optionally) the current
/// balance as of that date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportContext {
    pub t0: NaiveDate,
    #[serde(default)]
    pub current_balance: Option<Decimal>,
}

impl ReportContext {
    pub fn new(t0: NaiveDate) -> Self {
        Self {
            t0,
            current_balance: None,
        }
    }

    pub fn with_current_balance(mut self, balance: Decimal) -> Self {
        self.current_balance = Some(balance);
        self
    }
}

/// A per-transaction override: `None` means "no instruction for this flag".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionOverride {
    #[serde(default)]
    pub is_payroll: Option<bool>,
    #[serde(default)]
    pub is_loanpay: Option<bool>,
}

/// Map from transaction id to an override instruction. A missing id is a
/// no-op; overriding a non-existent id is likewise a no-op.
pub type OverrideMap = HashMap<String, TransactionOverride>;

/// A [`Transaction`] after heuristic classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedTransaction {
    pub transaction: Transaction,
    pub is_payroll: bool,
    pub is_loanpay: bool,
    pub is_odfee: bool,
    /// 3-bit mask: bit0 = category, bit1 = keyword, bit2 = cadence.
    pub payroll_rule_mask: u8,
    /// One of `{0.0, 0.2, 0.5, 1.0}` before overrides; `{0.0, 1.0}` after a
    /// payroll override forces it.
    pub payroll_confidence_weight: f64,
}

impl TaggedTransaction {
    pub fn date(&self) -> NaiveDate {
        self.transaction.date
    }

    pub fn amount(&self) -> Decimal {
        self.transaction.amount
    }
}

/// The eleven nullable behavioral metrics computed by the window aggregator.
/// Each field is either a value or `None` for "insufficient data" — never a
/// numeric sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricVector {
    pub history_days: Option<i64>,
    pub median_paycheck: Option<f64>,
    pub paycheck_regularity: Option<f64>,
    pub days_since_last_paycheck: Option<i64>,
    pub overdraft_count90: Option<i64>,
    pub clean_buffer7: Option<f64>,
    pub buffer_volatility: Option<f64>,
    pub deposit_multiplicity30: Option<f64>,
    pub net_cash30: Option<f64>,
    pub debt_load30: Option<f64>,
    pub volatility90: Option<f64>,
}

/// Per-metric point contributions produced by the point scorer. These sum
/// exactly to `base_score`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointBreakdown {
    pub history_days: i32,
    pub overdraft_count90: i32,
    pub paycheck_regularity: i32,
    pub days_since_last_paycheck: i32,
    pub debt_load30: i32,
    pub net_cash30: i32,
    pub volatility90: i32,
    pub median_paycheck: i32,
    pub liquidity_composite: i32,
    pub deposit_multiplicity_penalty: i32,
}

impl PointBreakdown {
    pub fn sum(&self) -> i32 {
        self.history_days
            + self.overdraft_count90
            + self.paycheck_regularity
            + self.days_since_last_paycheck
            + self.debt_load30
            + self.net_cash30
            + self.volatility90
            + self.median_paycheck
            + self.liquidity_composite
            + self.deposit_multiplicity_penalty
    }
}

/// Approve/reject outcome from the recommendation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Approved,
    Rejected,
}

/// The three independent early-warning flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flags {
    pub od_vol: bool,
    pub cash_crunch: bool,
    pub debt_trap: bool,
}

/// Full engine output for a single scoring invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub metrics: MetricVector,
    pub points: PointBreakdown,
    pub base_score: i32,
    pub blink_score: f64,
    pub recommendation: Recommendation,
    pub flags: Flags,
    /// Carried through for traceability, per `spec.md` §6.
    pub tagged_transactions: Vec<TaggedTransaction>,
}
