//! End-to-end tests of the `blinkscore` binary itself, exercised as a
//! subprocess rather than through the library API — these catch argument
//! parsing, stdin wiring, and JSON-on-the-wire mistakes that unit tests
//! against `score_with_config` can't see.

use assert_cmd::Command;

fn bundle() -> String {
    let t0 = "2025-05-01";
    let mut transactions = Vec::new();
    let mut pay_date = chrono::NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
    for i in 0..10 {
        transactions.push(serde_json::json!({
            "id": format!("pay{i}"),
            "date": pay_date.to_string(),
            "amount": "-1800.00",
            "merchant_name": "ADP PAYROLL",
            "category_path": ["Payroll"],
        }));
        pay_date -= chrono::Duration::days(14);
    }
    serde_json::json!({
        "transactions": transactions,
        "balances": [{"date": t0, "balance": "900.00"}],
        "context": {"t0": t0, "current_balance": "900.00"},
        "overrides": {},
    })
    .to_string()
}

#[test]
fn score_subcommand_reads_stdin_and_emits_json() {
    let output = Command::cargo_bin("blinkscore")
        .unwrap()
        .args(["score", "--input", "-", "--format", "json"])
        .write_stdin(bundle())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("blink_score"));
}

#[test]
fn validate_subcommand_emits_metrics_without_a_score() {
    let output = Command::cargo_bin("blinkscore")
        .unwrap()
        .args(["validate", "--input", "-", "--format", "json"])
        .write_stdin(bundle())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("median_paycheck"));
    assert!(!stdout.contains("blink_score"));
}

#[test]
fn score_subcommand_reports_insufficient_history_without_failing() {
    let thin = serde_json::json!({
        "transactions": [{
            "id": "only",
            "date": "2025-04-25",
            "amount": "-100.00",
        }],
        "context": {"t0": "2025-05-01"},
    })
    .to_string();

    let output = Command::cargo_bin("blinkscore")
        .unwrap()
        .args(["score", "--input", "-", "--format", "json"])
        .write_stdin(thin)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("insufficient_history"));
}
