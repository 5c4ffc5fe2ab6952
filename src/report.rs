//! Plain-text rendering of a computed [`Schedule`].

use std::fmt::{self, Write};

use crate::loan::{LedgerEntry, Schedule, YearlySummary};

const RULE_WIDTH: usize = 72;
const SUMMARY_WIDTH: usize = 40;

/// Formats an amount to two decimals with comma thousands separators.
pub fn with_thousands(amt: f64) -> String {
    let fixed = format!("{:.2}", amt.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amt < 0. && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

pub fn render_year<W: Write>(
    out: &mut W,
    summary: &YearlySummary,
    entries: &[LedgerEntry],
    show_monthly: bool,
) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}:", summary.year)?;

    if show_monthly {
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(
            out,
            "{:>5} | {:>16} | {:>14} | {:>16} | {:>16}",
            "Month", "Payment", "Interest", "Principal", "Balance"
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for entry in entries {
            writeln!(out, "{}", entry)?;
        }
    }

    if summary.extra > 0. {
        writeln!(out)?;
        writeln!(out, "Extra payment at year end: {:.2} EUR", summary.extra)?;
    }

    writeln!(out)?;
    writeln!(out, "Summary for {}:", summary.year)?;
    writeln!(out, "Total interest: {:.2} EUR", summary.interest)?;
    writeln!(out, "Total principal: {:.2} EUR", summary.principal)?;
    writeln!(out, "Remaining balance: {:.2} EUR", summary.balance)
}

pub fn render_summary<W: Write>(out: &mut W, schedule: &Schedule) -> fmt::Result {
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "FINAL SUMMARY:")?;
    writeln!(out, "{}", "=".repeat(SUMMARY_WIDTH))?;
    writeln!(
        out,
        "Initial loan: {} EUR",
        with_thousands(schedule.params.principal())
    )?;
    writeln!(out, "Total paid: {} EUR", with_thousands(schedule.total_paid()))?;
    writeln!(
        out,
        "Of which interest: {} EUR",
        with_thousands(schedule.total_interest)
    )?;
    writeln!(
        out,
        "Of which principal: {} EUR",
        with_thousands(schedule.total_principal)
    )?;
    writeln!(
        out,
        "Effective interest rate: {}%",
        with_thousands(schedule.effective_rate())
    )?;
    if schedule.paid_off_early() {
        writeln!(
            out,
            "Paid off after {} of {} months",
            schedule.get_pmt_count(),
            schedule.params.term_months()
        )?;
    }
    writeln!(out, "{}", "=".repeat(SUMMARY_WIDTH))
}

pub fn render<W: Write>(out: &mut W, schedule: &Schedule, show_monthly: bool) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "LOAN CALCULATOR")?;
    writeln!(out, "{}", "=".repeat(SUMMARY_WIDTH))?;

    // summaries cover the ledger in order, `months` entries each
    let mut rest = schedule.entries.as_slice();
    for summary in &schedule.years {
        let (entries, tail) = rest.split_at((summary.months as usize).min(rest.len()));
        render_year(out, summary, entries, show_monthly)?;
        rest = tail;
    }

    render_summary(out, schedule)
}

pub fn render_to_string(schedule: &Schedule, show_monthly: bool) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = render(&mut out, schedule, show_monthly);
    out
}
