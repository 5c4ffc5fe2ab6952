use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("amortize").unwrap()
}

#[test]
fn schedule_from_arguments() {
    cmd()
        .args(["--start-year", "2030", "100000", "5", "12", "0"])
        .assert()
        .success()
        .stdout(contains("\n2030:\n"))
        .stdout(contains("Of which interest: 2,728.98 EUR"))
        .stdout(contains("Of which principal: 100,000.00 EUR"))
        .stdout(contains("\n2031:\n").not());
}

#[test]
fn extra_payment_report() {
    cmd()
        .args(["--start-year", "2030", "--no-monthly", "100000", "5", "24", "10000"])
        .assert()
        .success()
        .stdout(contains("Extra payment at year end: 10000.00 EUR"))
        .stdout(contains("Month |").not());
}

#[test]
fn malformed_arguments_fall_back_to_defaults() {
    cmd()
        .args(["--no-prompt", "abc", "5", "12", "0"])
        .assert()
        .success()
        .stderr(contains("expected a number, using defaults"))
        .stderr(contains("interactive").not())
        .stdout(contains("Initial loan: 76,874.00 EUR"));
}

#[test]
fn malformed_arguments_ask_for_input() {
    cmd()
        .args(["abc", "5", "12", "0"])
        .write_stdin("20000\n4\n12\n0\n")
        .assert()
        .success()
        .stderr(contains("falling back to interactive input"))
        .stdout(contains("Initial loan: 20,000.00 EUR"));
}

#[test]
fn negative_rate_is_rejected() {
    cmd()
        .args(["--no-prompt", "100000", "-5", "12", "0"])
        .assert()
        .success()
        .stderr(contains("rate must not be negative"))
        .stdout(contains("Initial loan: 76,874.00 EUR"));
}

#[test]
fn partial_arguments_fall_back() {
    cmd()
        .args(["--no-prompt", "100000", "5"])
        .assert()
        .success()
        .stderr(contains("expected 4 arguments"))
        .stderr(contains("using defaults"));
}

#[test]
fn answers_from_stdin() {
    cmd()
        .write_stdin("50000\n0\n12\n\n")
        .assert()
        .success()
        .stdout(contains("Initial loan: 50,000.00 EUR"))
        .stdout(contains("Of which interest: 0.00 EUR"));
}

#[test]
fn invalid_stdin_answer_is_asked_again() {
    cmd()
        .write_stdin("lots\n1000\n0\n1\n0\n")
        .assert()
        .success()
        .stderr(contains("invalid amount 'lots'"))
        .stdout(contains("Initial loan: 1,000.00 EUR"));
}

#[cfg(feature = "serde")]
#[test]
fn json_output() {
    cmd()
        .args(["--json", "--start-year", "2030", "100000", "5", "24", "10000"])
        .assert()
        .success()
        .stdout(contains("\"total_principal\": 100000.0"))
        .stdout(contains("\"start_year\": 2030"))
        .stdout(contains("\"extra\": 10000.0"))
        .stdout(contains("LOAN CALCULATOR").not());
}
