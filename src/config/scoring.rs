use serde::{Deserialize, Serialize};

/// Bucket cut-offs and point values for the point scorer, plus the
/// normalizer's affine-transform constants. Defaults reproduce `spec.md`
/// §4.3-§4.4 exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringThresholds {
    #[serde(default = "default_history_mature_days")]
    pub history_mature_days: i64,
    #[serde(default = "default_history_established_days")]
    pub history_established_days: i64,
    #[serde(default = "default_points_history_mature")]
    pub points_history_mature: i32,
    #[serde(default = "default_points_history_established")]
    pub points_history_established: i32,

    #[serde(default = "default_points_overdraft_clean")]
    pub points_overdraft_clean: i32,
    #[serde(default = "default_points_overdraft_low")]
    pub points_overdraft_low: i32,
    #[serde(default = "default_points_overdraft_high")]
    pub points_overdraft_high: i32,

    #[serde(default = "default_regularity_tight_days")]
    pub regularity_tight_days: f64,
    #[serde(default = "default_regularity_loose_days")]
    pub regularity_loose_days: f64,
    #[serde(default = "default_points_regularity_tight")]
    pub points_regularity_tight: i32,
    #[serde(default = "default_points_regularity_loose")]
    pub points_regularity_loose: i32,
    #[serde(default = "default_points_regularity_poor")]
    pub points_regularity_poor: i32,

    #[serde(default = "default_days_since_paycheck_recent")]
    pub days_since_paycheck_recent: i64,
    #[serde(default = "default_days_since_paycheck_stale")]
    pub days_since_paycheck_stale: i64,
    #[serde(default = "default_points_paycheck_recent")]
    pub points_paycheck_recent: i32,
    #[serde(default = "default_points_paycheck_stale")]
    pub points_paycheck_stale: i32,
    #[serde(default = "default_points_paycheck_overdue")]
    pub points_paycheck_overdue: i32,

    #[serde(default = "default_debt_load_light")]
    pub debt_load_light: f64,
    #[serde(default = "default_debt_load_moderate")]
    pub debt_load_moderate: f64,
    #[serde(default = "default_points_debt_light")]
    pub points_debt_light: i32,
    #[serde(default = "default_points_debt_moderate")]
    pub points_debt_moderate: i32,
    #[serde(default = "default_points_debt_heavy")]
    pub points_debt_heavy: i32,

    #[serde(default = "default_points_net_cash_positive")]
    pub points_net_cash_positive: i32,
    #[serde(default = "default_points_net_cash_negative")]
    pub points_net_cash_negative: i32,

    #[serde(default = "default_volatility_low")]
    pub volatility_low: f64,
    #[serde(default = "default_volatility_moderate")]
    pub volatility_moderate: f64,
    #[serde(default = "default_points_volatility_low")]
    pub points_volatility_low: i32,
    #[serde(default = "default_points_volatility_moderate")]
    pub points_volatility_moderate: i32,
    #[serde(default = "default_points_volatility_high")]
    pub points_volatility_high: i32,

    #[serde(default = "default_paycheck_strong")]
    pub paycheck_strong: f64,
    #[serde(default = "default_paycheck_solid")]
    pub paycheck_solid: f64,
    #[serde(default = "default_paycheck_modest")]
    pub paycheck_modest: f64,
    #[serde(default = "default_points_paycheck_strong")]
    pub points_paycheck_strong: i32,
    #[serde(default = "default_points_paycheck_solid")]
    pub points_paycheck_solid: i32,
    #[serde(default = "default_points_paycheck_modest")]
    pub points_paycheck_modest: i32,
    #[serde(default = "default_points_paycheck_thin")]
    pub points_paycheck_thin: i32,

    #[serde(default = "default_liquidity_buffer_strong")]
    pub liquidity_buffer_strong: f64,
    #[serde(default = "default_liquidity_buffer_adequate")]
    pub liquidity_buffer_adequate: f64,
    #[serde(default = "default_liquidity_volatility_calm")]
    pub liquidity_volatility_calm: f64,
    #[serde(default = "default_points_liquidity_calm")]
    pub points_liquidity_calm: i32,
    #[serde(default = "default_points_liquidity_volatile_or_unknown")]
    pub points_liquidity_volatile_or_unknown: i32,
    #[serde(default = "default_points_liquidity_adequate")]
    pub points_liquidity_adequate: i32,
    #[serde(default = "default_points_liquidity_thin")]
    pub points_liquidity_thin: i32,

    #[serde(default = "default_deposit_multiplicity_ceiling")]
    pub deposit_multiplicity_ceiling: f64,
    #[serde(default = "default_points_deposit_multiplicity_penalty")]
    pub points_deposit_multiplicity_penalty: i32,

    #[serde(default = "default_low_confidence_avg_weight")]
    pub low_confidence_avg_weight: f64,

    #[serde(default = "default_normalize_mean")]
    pub normalize_mean: f64,
    #[serde(default = "default_normalize_stddev")]
    pub normalize_stddev: f64,
    #[serde(default = "default_normalize_center")]
    pub normalize_center: f64,
    #[serde(default = "default_normalize_scale")]
    pub normalize_scale: f64,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            history_mature_days: default_history_mature_days(),
            history_established_days: default_history_established_days(),
            points_history_mature: default_points_history_mature(),
            points_history_established: default_points_history_established(),

            points_overdraft_clean: default_points_overdraft_clean(),
            points_overdraft_low: default_points_overdraft_low(),
            points_overdraft_high: default_points_overdraft_high(),

            regularity_tight_days: default_regularity_tight_days(),
            regularity_loose_days: default_regularity_loose_days(),
            points_regularity_tight: default_points_regularity_tight(),
            points_regularity_loose: default_points_regularity_loose(),
            points_regularity_poor: default_points_regularity_poor(),

            days_since_paycheck_recent: default_days_since_paycheck_recent(),
            days_since_paycheck_stale: default_days_since_paycheck_stale(),
            points_paycheck_recent: default_points_paycheck_recent(),
            points_paycheck_stale: default_points_paycheck_stale(),
            points_paycheck_overdue: default_points_paycheck_overdue(),

            debt_load_light: default_debt_load_light(),
            debt_load_moderate: default_debt_load_moderate(),
            points_debt_light: default_points_debt_light(),
            points_debt_moderate: default_points_debt_moderate(),
            points_debt_heavy: default_points_debt_heavy(),

            points_net_cash_positive: default_points_net_cash_positive(),
            points_net_cash_negative: default_points_net_cash_negative(),

            volatility_low: default_volatility_low(),
            volatility_moderate: default_volatility_moderate(),
            points_volatility_low: default_points_volatility_low(),
            points_volatility_moderate: default_points_volatility_moderate(),
            points_volatility_high: default_points_volatility_high(),

            paycheck_strong: default_paycheck_strong(),
            paycheck_solid: default_paycheck_solid(),
            paycheck_modest: default_paycheck_modest(),
            points_paycheck_strong: default_points_paycheck_strong(),
            points_paycheck_solid: default_points_paycheck_solid(),
            points_paycheck_modest: default_points_paycheck_modest(),
            points_paycheck_thin: default_points_paycheck_thin(),

            liquidity_buffer_strong: default_liquidity_buffer_strong(),
            liquidity_buffer_adequate: default_liquidity_buffer_adequate(),
            liquidity_volatility_calm: default_liquidity_volatility_calm(),
            points_liquidity_calm: default_points_liquidity_calm(),
            points_liquidity_volatile_or_unknown: default_points_liquidity_volatile_or_unknown(),
            points_liquidity_adequate: default_points_liquidity_adequate(),
            points_liquidity_thin: default_points_liquidity_thin(),

            deposit_multiplicity_ceiling: default_deposit_multiplicity_ceiling(),
            points_deposit_multiplicity_penalty: default_points_deposit_multiplicity_penalty(),

            low_confidence_avg_weight: default_low_confidence_avg_weight(),

            normalize_mean: default_normalize_mean(),
            normalize_stddev: default_normalize_stddev(),
            normalize_center: default_normalize_center(),
            normalize_scale: default_normalize_scale(),
        }
    }
}

fn default_history_mature_days() -> i64 {
    365
}
fn default_history_established_days() -> i64 {
    180
}
fn default_points_history_mature() -> i32 {
    10
}
fn default_points_history_established() -> i32 {
    5
}

fn default_points_overdraft_clean() -> i32 {
    20
}
fn default_points_overdraft_low() -> i32 {
    5
}
fn default_points_overdraft_high() -> i32 {
    -15
}

fn default_regularity_tight_days() -> f64 {
    2.0
}
fn default_regularity_loose_days() -> f64 {
    5.0
}
fn default_points_regularity_tight() -> i32 {
    25
}
fn default_points_regularity_loose() -> i32 {
    10
}
fn default_points_regularity_poor() -> i32 {
    -10
}

fn default_days_since_paycheck_recent() -> i64 {
    7
}
fn default_days_since_paycheck_stale() -> i64 {
    14
}
fn default_points_paycheck_recent() -> i32 {
    10
}
fn default_points_paycheck_stale() -> i32 {
    0
}
fn default_points_paycheck_overdue() -> i32 {
    -10
}

fn default_debt_load_light() -> f64 {
    0.15
}
fn default_debt_load_moderate() -> f64 {
    0.30
}
fn default_points_debt_light() -> i32 {
    20
}
fn default_points_debt_moderate() -> i32 {
    5
}
fn default_points_debt_heavy() -> i32 {
    -15
}

fn default_points_net_cash_positive() -> i32 {
    10
}
fn default_points_net_cash_negative() -> i32 {
    -10
}

fn default_volatility_low() -> f64 {
    0.40
}
fn default_volatility_moderate() -> f64 {
    0.70
}
fn default_points_volatility_low() -> i32 {
    10
}
fn default_points_volatility_moderate() -> i32 {
    0
}
fn default_points_volatility_high() -> i32 {
    -10
}

fn default_paycheck_strong() -> f64 {
    1500.0
}
fn default_paycheck_solid() -> f64 {
    1000.0
}
fn default_paycheck_modest() -> f64 {
    600.0
}
fn default_points_paycheck_strong() -> i32 {
    20
}
fn default_points_paycheck_solid() -> i32 {
    10
}
fn default_points_paycheck_modest() -> i32 {
    0
}
fn default_points_paycheck_thin() -> i32 {
    -10
}

fn default_liquidity_buffer_strong() -> f64 {
    300.0
}
fn default_liquidity_buffer_adequate() -> f64 {
    100.0
}
fn default_liquidity_volatility_calm() -> f64 {
    50.0
}
fn default_points_liquidity_calm() -> i32 {
    40
}
fn default_points_liquidity_volatile_or_unknown() -> i32 {
    25
}
fn default_points_liquidity_adequate() -> i32 {
    10
}
fn default_points_liquidity_thin() -> i32 {
    -20
}

fn default_deposit_multiplicity_ceiling() -> f64 {
    4.0
}
fn default_points_deposit_multiplicity_penalty() -> i32 {
    -15
}

fn default_low_confidence_avg_weight() -> f64 {
    0.25
}

fn default_normalize_mean() -> f64 {
    40.0
}
fn default_normalize_stddev() -> f64 {
    25.0
}
fn default_normalize_center() -> f64 {
    50.0
}
fn default_normalize_scale() -> f64 {
    15.0
}
