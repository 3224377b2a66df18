use serde::{Deserialize, Serialize};

/// Keyword lists and cadence-detector constants used by the heuristic
/// tagger. Defaults reproduce `spec.md` §4.1 exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggerConfig {
    #[serde(default = "default_payroll_category_token")]
    pub payroll_category_token: String,

    #[serde(default = "default_payroll_category_id_prefix")]
    pub payroll_category_id_prefix: String,

    #[serde(default = "default_payroll_keywords")]
    pub payroll_keywords: Vec<String>,

    #[serde(default = "default_loan_category_tokens")]
    pub loan_category_tokens: Vec<String>,

    #[serde(default = "default_loan_category_id_prefix")]
    pub loan_category_id_prefix: String,

    #[serde(default = "default_loan_keywords")]
    pub loan_keywords: Vec<String>,

    #[serde(default = "default_p2p_exclusion_keywords")]
    pub p2p_exclusion_keywords: Vec<String>,

    #[serde(default = "default_overdraft_category_id")]
    pub overdraft_category_id: String,

    #[serde(default = "default_overdraft_keywords")]
    pub overdraft_keywords: Vec<String>,

    /// Width of the cadence-detector amount bucket, in dollars.
    #[serde(default = "default_cadence_bucket_width")]
    pub cadence_bucket_width: f64,

    /// Minimum deposits in a bucket before cadence is tested.
    #[serde(default = "default_cadence_min_bucket_size")]
    pub cadence_min_bucket_size: usize,

    /// Candidate cadences (in days), tested in order.
    #[serde(default = "default_cadence_targets")]
    pub cadence_targets: Vec<i64>,

    /// Gap tolerance around a cadence target, in days.
    #[serde(default = "default_cadence_tolerance_days")]
    pub cadence_tolerance_days: i64,

    /// Minimum matching gaps required to confirm a cadence.
    #[serde(default = "default_cadence_min_matches")]
    pub cadence_min_matches: usize,

    /// Lookback window (days) for the cadence detector, relative to T0.
    #[serde(default = "default_cadence_lookback_days")]
    pub cadence_lookback_days: i64,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            payroll_category_token: default_payroll_category_token(),
            payroll_category_id_prefix: default_payroll_category_id_prefix(),
            payroll_keywords: default_payroll_keywords(),
            loan_category_tokens: default_loan_category_tokens(),
            loan_category_id_prefix: default_loan_category_id_prefix(),
            loan_keywords: default_loan_keywords(),
            p2p_exclusion_keywords: default_p2p_exclusion_keywords(),
            overdraft_category_id: default_overdraft_category_id(),
            overdraft_keywords: default_overdraft_keywords(),
            cadence_bucket_width: default_cadence_bucket_width(),
            cadence_min_bucket_size: default_cadence_min_bucket_size(),
            cadence_targets: default_cadence_targets(),
            cadence_tolerance_days: default_cadence_tolerance_days(),
            cadence_min_matches: default_cadence_min_matches(),
            cadence_lookback_days: default_cadence_lookback_days(),
        }
    }
}

fn default_payroll_category_token() -> String {
    "Payroll".to_string()
}
fn default_payroll_category_id_prefix() -> String {
    "21006".to_string()
}
fn default_payroll_keywords() -> Vec<String> {
    strings(&[
        "ADP",
        "PAYROLL",
        "PAYCHEX",
        "PAYROLL CORP",
        "GUSTO",
        "TRINET",
        "INTUIT PAYROLL",
        "BAMBOOHR",
    ])
}
fn default_loan_category_tokens() -> Vec<String> {
    strings(&["Loan Payment", "Credit Card Payment"])
}
fn default_loan_category_id_prefix() -> String {
    "23005".to_string()
}
fn default_loan_keywords() -> Vec<String> {
    strings(&[
        "FINANCE",
        "LOAN",
        "CREDIT",
        "CAPITAL ONE",
        "DISCOVER",
        "CHASE CARD",
        "AMEX",
    ])
}
fn default_p2p_exclusion_keywords() -> Vec<String> {
    strings(&["ZELLE", "VENMO", "CASH APP", "PAYPAL"])
}
fn default_overdraft_category_id() -> String {
    "22001000".to_string()
}
fn default_overdraft_keywords() -> Vec<String> {
    strings(&["OVERDRAFT", "OD FEE", "RET ITEM FEE", "NSF FEE"])
}
fn default_cadence_bucket_width() -> f64 {
    2.0
}
fn default_cadence_min_bucket_size() -> usize {
    3
}
fn default_cadence_targets() -> Vec<i64> {
    vec![7, 14, 15]
}
fn default_cadence_tolerance_days() -> i64 {
    1
}
fn default_cadence_min_matches() -> usize {
    2
}
fn default_cadence_lookback_days() -> i64 {
    90
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
