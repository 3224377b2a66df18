//! Heuristic tagger: classifies transactions as payroll, loan-payment, or
//! overdraft-fee, and runs the cadence-detector post-pass. See `spec.md`
//! §4.1.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use tracing::warn;

use crate::calendar::Window;
use crate::config::TaggerConfig;
use crate::types::{OverrideMap, TaggedTransaction, Transaction};

const RULE_CATEGORY: u8 = 1 << 0;
const RULE_KEYWORD: u8 = 1 << 1;
const RULE_CADENCE: u8 = 1 << 2;

/// Precompiled whole-word, case-insensitive keyword matchers built once from
/// the effective [`TaggerConfig`].
struct KeywordMatchers {
    payroll: RegexSet,
    loan: RegexSet,
    p2p_exclusion: RegexSet,
    overdraft: RegexSet,
    payment_word: Regex,
}

impl KeywordMatchers {
    fn build(config: &TaggerConfig) -> Self {
        Self {
            payroll: word_boundary_set(&config.payroll_keywords),
            loan: word_boundary_set(&config.loan_keywords),
            p2p_exclusion: word_boundary_set(&config.p2p_exclusion_keywords),
            overdraft: word_boundary_set(&config.overdraft_keywords),
            payment_word: word_boundary(&"PAYMENT".to_string()),
        }
    }
}

/// The spec-literal default config's keyword lists never change within a
/// process, so its matcher set is compiled once and shared across every
/// call on the common default-config path, instead of recompiling the same
/// regex set per invocation.
static DEFAULT_KEYWORD_MATCHERS: Lazy<KeywordMatchers> =
    Lazy::new(|| KeywordMatchers::build(&TaggerConfig::default()));

enum Matchers {
    Shared(&'static KeywordMatchers),
    Owned(KeywordMatchers),
}

impl std::ops::Deref for Matchers {
    type Target = KeywordMatchers;
    fn deref(&self) -> &KeywordMatchers {
        match self {
            Matchers::Shared(m) => m,
            Matchers::Owned(m) => m,
        }
    }
}

/// Reuse the process-wide default matcher set on the common path; rebuild
/// for a caller-supplied custom configuration, since its keyword lists may
/// differ per call.
fn keyword_matchers_for(config: &TaggerConfig) -> Matchers {
    if config == &TaggerConfig::default() {
        Matchers::Shared(Lazy::force(&DEFAULT_KEYWORD_MATCHERS))
    } else {
        Matchers::Owned(KeywordMatchers::build(config))
    }
}

fn word_boundary(token: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(token))).expect("static keyword pattern")
}

fn word_boundary_set(tokens: &[String]) -> RegexSet {
    let patterns: Vec<String> = tokens
        .iter()
        .map(|t| format!(r"(?i)\b{}\b", regex::escape(t)))
        .collect();
    RegexSet::new(patterns).expect("static keyword pattern set")
}

/// Merchant name plus raw description, for the payroll keyword rule only —
/// `spec.md` §4.1 allows either field there.
fn haystack(transaction: &Transaction) -> String {
    let mut parts = Vec::new();
    if let Some(merchant) = &transaction.merchant_name {
        parts.push(merchant.as_str());
    }
    if let Some(description) = &transaction.raw_description {
        parts.push(description.as_str());
    }
    parts.join(" ")
}

/// Raw description only. The loan/credit keyword rule, the P2P-exclusion
/// "PAYMENT" rule, and the overdraft-fee keyword rule are all written against
/// "description" alone in `spec.md` §4.1 — unlike payroll, merchant name
/// doesn't feed these.
fn description_haystack(transaction: &Transaction) -> &str {
    transaction.raw_description.as_deref().unwrap_or("")
}

fn category_contains(transaction: &Transaction, token: &str) -> bool {
    transaction.category_path.iter().any(|c| c == token)
}

fn category_id_starts_with(transaction: &Transaction, prefix: &str) -> bool {
    transaction
        .category_id
        .as_deref()
        .is_some_and(|id| id.starts_with(prefix))
}

fn payroll_rule_mask(transaction: &Transaction, config: &TaggerConfig, kw: &KeywordMatchers) -> u8 {
    let mut mask = 0u8;
    if category_contains(transaction, &config.payroll_category_token)
        || category_id_starts_with(transaction, &config.payroll_category_id_prefix)
    {
        mask |= RULE_CATEGORY;
    }
    if kw.payroll.is_match(&haystack(transaction)) {
        mask |= RULE_KEYWORD;
    }
    mask
}

fn confidence_weight_for_mask(mask: u8) -> f64 {
    match mask.count_ones() {
        3 => 1.0,
        2 => 0.5,
        1 => 0.2,
        _ => 0.0,
    }
}

/// Loan/credit payment classification: first matching rule wins.
fn is_loanpay(transaction: &Transaction, config: &TaggerConfig, kw: &KeywordMatchers) -> bool {
    let category_match = config
        .loan_category_tokens
        .iter()
        .any(|token| category_contains(transaction, token))
        || category_id_starts_with(transaction, &config.loan_category_id_prefix);
    if category_match {
        return true;
    }

    let text = description_haystack(transaction);
    if kw.loan.is_match(text) {
        return true;
    }

    kw.payment_word.is_match(text) && !kw.p2p_exclusion.is_match(text)
}

fn is_odfee(transaction: &Transaction, config: &TaggerConfig, kw: &KeywordMatchers) -> bool {
    if transaction
        .category_id
        .as_deref()
        .is_some_and(|id| id == config.overdraft_category_id)
    {
        return true;
    }
    kw.overdraft.is_match(description_haystack(transaction))
}

/// Group inflows into `$width`-wide amount buckets, keyed by
/// `round(|amount| / width) * width` in cents to stay exact.
fn bucket_key(amount_abs: f64, width: f64) -> i64 {
    ((amount_abs / width).round() * width * 100.0).round() as i64
}

/// Cadence-detector post-pass: mutates the mask of every tagged transaction
/// whose bucket exhibits a matching cadence. Operates only on inflows within
/// `config.cadence_lookback_days` of `t0`.
fn apply_cadence_detection(
    tagged: &mut [TaggedTransaction],
    t0: chrono::NaiveDate,
    config: &TaggerConfig,
) {
    let window = Window::ending(t0, config.cadence_lookback_days);

    let mut buckets: HashMap<i64, Vec<usize>> = HashMap::new();
    for (idx, t) in tagged.iter().enumerate() {
        if !t.transaction.is_inflow() || !window.contains(t.date()) {
            continue;
        }
        let amount_abs = (-t.amount()).to_string().parse::<f64>().unwrap_or(0.0);
        let key = bucket_key(amount_abs, config.cadence_bucket_width);
        buckets.entry(key).or_default().push(idx);
    }

    for indices in buckets.values() {
        if indices.len() < config.cadence_min_bucket_size {
            continue;
        }
        let mut sorted = indices.clone();
        sorted.sort_by_key(|&i| tagged[i].date());

        let gaps: Vec<i64> = sorted
            .windows(2)
            .map(|pair| (tagged[pair[1]].date() - tagged[pair[0]].date()).num_days())
            .collect();

        for &target in &config.cadence_targets {
            let matches = gaps
                .iter()
                .filter(|&&gap| (gap - target).abs() <= config.cadence_tolerance_days)
                .count();
            if matches >= config.cadence_min_matches {
                for &idx in indices {
                    tagged[idx].payroll_rule_mask |= RULE_CADENCE;
                    tagged[idx].is_payroll = true;
                    tagged[idx].payroll_confidence_weight =
                        confidence_weight_for_mask(tagged[idx].payroll_rule_mask);
                }
                break;
            }
        }
    }
}

/// Tag every transaction, run the cadence post-pass, then apply overrides.
/// Rows with an unparseable amount or date never reach this function — the
/// caller is expected to have already excluded them, per `spec.md` §4.1's
/// "skipped (logged) and excluded" failure mode; this function additionally
/// logs a warning for any row whose amount is exactly zero, since that row
/// can't be classified as either inflow or outflow and contributes to no
/// rule.
///
/// The cadence detector needs a reference date `T0` for its 90-day lookback
/// window (`spec.md` §4.1). Standalone callers that don't have a
/// [`crate::types::ReportContext`] get the latest observed transaction date
/// as a stand-in; the engine's top-level pipeline calls
/// [`tag_transactions_at`] with the caller's actual `T0` instead.
pub fn tag_transactions(
    transactions: &[Transaction],
    overrides: &OverrideMap,
) -> Vec<TaggedTransaction> {
    let t0 = transactions
        .iter()
        .map(|t| t.date)
        .max()
        .unwrap_or_else(|| chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    tag_transactions_at(transactions, overrides, t0, &TaggerConfig::default())
}

/// Tag with an explicit `T0` and configuration, so the cadence detector's
/// lookback window is anchored to the caller's actual reference date rather
/// than the latest observed transaction. Used by the engine's top-level
/// pipeline.
pub fn tag_transactions_at(
    transactions: &[Transaction],
    overrides: &OverrideMap,
    t0: chrono::NaiveDate,
    config: &TaggerConfig,
) -> Vec<TaggedTransaction> {
    let kw = keyword_matchers_for(config);

    let mut tagged: Vec<TaggedTransaction> = transactions
        .iter()
        .filter_map(|transaction| {
            if transaction.amount.is_zero() {
                warn!(id = %transaction.id, "skipping transaction with zero amount");
                return None;
            }

            let mut mask = 0u8;
            if transaction.is_inflow() {
                mask = payroll_rule_mask(transaction, config, &kw);
            }
            let is_payroll = mask != 0;
            let is_loanpay = transaction.is_outflow() && is_loanpay(transaction, config, &kw);
            let is_odfee = is_odfee(transaction, config, &kw);

            Some(TaggedTransaction {
                transaction: transaction.clone(),
                is_payroll,
                is_loanpay,
                is_odfee,
                payroll_rule_mask: mask,
                payroll_confidence_weight: confidence_weight_for_mask(mask),
            })
        })
        .collect();

    apply_cadence_detection(&mut tagged, t0, config);
    apply_overrides(&mut tagged, overrides);
    tagged
}

fn apply_overrides(tagged: &mut [TaggedTransaction], overrides: &OverrideMap) {
    for t in tagged.iter_mut() {
        let Some(over) = overrides.get(&t.transaction.id) else {
            continue;
        };
        if let Some(is_payroll) = over.is_payroll {
            t.is_payroll = is_payroll;
            if is_payroll {
                t.payroll_confidence_weight = 1.0;
            } else {
                t.payroll_confidence_weight = 0.0;
                t.payroll_rule_mask = 0;
            }
        }
        if let Some(is_loanpay) = over.is_loanpay {
            t.is_loanpay = is_loanpay;
        }
    }
}
