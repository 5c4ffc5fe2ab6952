use log::{debug, info, trace};
use std::fmt;

use crate::error::{LoanError, Result};

/// Currency precision used for payments and totals.
pub const DEC_PLACES: i32 = 2;

const MONTHS_PER_YEAR: u32 = 12;

/// Validated inputs for one schedule. Rates are per month, as decimals.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LoanParams {
    principal: f64,
    monthly_rate: f64,
    term_months: u32,
    yearly_extra: f64,
    start_year: i32,
}

impl LoanParams {
    pub fn new(
        principal: f64,
        monthly_rate: f64,
        term_months: u32,
        yearly_extra: f64,
        start_year: i32,
    ) -> Result<Self> {
        check_amount("principal", principal)?;
        if principal == 0. {
            return Err(LoanError::invalid("principal", "must be greater than zero"));
        }
        check_amount("monthly rate", monthly_rate)?;
        if !(principal * monthly_rate).is_finite() {
            return Err(LoanError::invalid("principal", "is too large for this rate"));
        }
        if term_months == 0 {
            return Err(LoanError::invalid("term", "must be at least one month"));
        }
        check_amount("yearly extra", yearly_extra)?;

        Ok(Self {
            principal,
            monthly_rate,
            term_months,
            yearly_extra,
            start_year,
        })
    }

    /// Builds parameters from a nominal annual rate given in percent (5.0 for 5%).
    pub fn from_annual_rate(
        principal: f64,
        annual_rate: f64,
        term_months: u32,
        yearly_extra: f64,
        start_year: i32,
    ) -> Result<Self> {
        check_amount("annual rate", annual_rate)?;
        Self::new(
            principal,
            annual_rate / 100. / 12.,
            term_months,
            yearly_extra,
            start_year,
        )
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn yearly_extra(&self) -> f64 {
        self.yearly_extra
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerEntry {
    pub month: u32,
    pub year: i32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

impl LedgerEntry {
    pub fn new(
        month: u32,
        year: i32,
        payment: f64,
        interest: f64,
        principal: f64,
        balance: f64,
    ) -> Self {
        Self {
            month,
            year,
            payment,
            interest,
            principal,
            balance,
        }
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:5} | {:12.2} EUR | {:10.2} EUR | {:12.2} EUR | {:12.2} EUR",
            self.month, self.payment, self.interest, self.principal, self.balance
        )
    }
}

/// Totals for one block of up to twelve months, including the extra payment
/// applied at its end.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearlySummary {
    pub year: i32,
    pub months: u32,
    pub interest: f64,
    pub principal: f64,
    pub extra: f64,
    pub balance: f64,
}

impl YearlySummary {
    pub fn new(
        year: i32,
        months: u32,
        interest: f64,
        principal: f64,
        extra: f64,
        balance: f64,
    ) -> Self {
        Self {
            year,
            months,
            interest,
            principal,
            extra,
            balance,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schedule {
    pub params: LoanParams,
    pub entries: Vec<LedgerEntry>,
    pub years: Vec<YearlySummary>,
    pub total_interest: f64,
    pub total_principal: f64,
}

impl Schedule {
    pub fn get_pmt_count(&self) -> usize {
        self.entries.len()
    }

    /// Ledger entry for a 1-based month number.
    pub fn get_entry(&self, month: usize) -> Option<&LedgerEntry> {
        month.checked_sub(1).and_then(|idx| self.entries.get(idx))
    }

    pub fn total_paid(&self) -> f64 {
        round(self.total_interest + self.total_principal, DEC_PLACES)
    }

    /// Total interest as a percentage of the original principal.
    pub fn effective_rate(&self) -> f64 {
        round(
            self.total_interest / self.params.principal * 100.,
            DEC_PLACES,
        )
    }

    pub fn final_balance(&self) -> f64 {
        self.years
            .last()
            .map(|y| y.balance)
            .unwrap_or(self.params.principal)
    }

    pub fn paid_off_early(&self) -> bool {
        self.get_pmt_count() < self.params.term_months as usize
    }
}

pub fn round(amt: f64, dec: i32) -> f64 {
    let scaled = amt * 10_f64.powi(dec);
    if amt == 0. {
        0.
    } else if !scaled.is_finite() {
        // too large to carry any fraction
        amt
    } else {
        scaled.round() / 10_f64.powi(dec)
    }
}

fn check_amount(field: &str, amt: f64) -> Result<()> {
    if !amt.is_finite() {
        Err(LoanError::invalid(field, "must be a finite number"))
    } else if amt < 0. {
        Err(LoanError::invalid(field, "must not be negative"))
    } else {
        Ok(())
    }
}

/// Level payment that amortizes `principal` over `months` payments at
/// `monthly_rate`, rounded to currency precision.
pub fn monthly_payment(principal: f64, monthly_rate: f64, months: u32) -> Result<f64> {
    check_amount("principal", principal)?;
    check_amount("monthly rate", monthly_rate)?;
    if months == 0 {
        return Err(LoanError::invalid("months", "must be at least one"));
    }
    let payment = level_payment(principal, monthly_rate, months);
    if !payment.is_finite() {
        return Err(LoanError::invalid("principal", "is too large for this rate"));
    }
    Ok(payment)
}

// months >= 1, inputs already validated
fn level_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    let factor = (1. + monthly_rate).powf(months as f64);
    if monthly_rate == 0. || factor <= 1. {
        round(principal / months as f64, DEC_PLACES)
    } else {
        // an overflowing factor leaves the interest-only payment
        round(
            principal * monthly_rate / (1. - factor.recip()),
            DEC_PLACES,
        )
    }
}

pub fn interest_payment(balance: f64, monthly_rate: f64) -> f64 {
    balance * monthly_rate
}

/// Portion of a requested extra payment that can be applied to `remaining`.
pub fn extra_payment(remaining: f64, requested: f64) -> f64 {
    if requested > 0. && remaining > 0. {
        requested.min(remaining)
    } else {
        0.
    }
}

/// Builds the month-by-month schedule. The level payment is recomputed at the
/// start of every year from the balance and months left, so an extra payment
/// lowers the payments that follow it instead of shortening the term.
pub fn compute_schedule(params: &LoanParams) -> Schedule {
    info!(
        "computing schedule: principal {:.2}, monthly rate {:.6}, term {} months, yearly extra {:.2}",
        params.principal, params.monthly_rate, params.term_months, params.yearly_extra
    );

    let term = params.term_months;
    let rate = params.monthly_rate;

    let mut remaining = params.principal;
    let mut total_interest = 0.;
    let mut total_principal = 0.;
    let mut month: u32 = 1;
    let mut year = params.start_year;
    let mut entries: Vec<LedgerEntry> = Vec::with_capacity(term as usize);
    let mut years: Vec<YearlySummary> = Vec::new();

    while month <= term && remaining > 0. {
        let months_left = term - month + 1;
        let payment = level_payment(remaining, rate, months_left);
        debug!(
            "year {}: payment {:.2} over {} remaining months",
            year, payment, months_left
        );

        let mut year_interest = 0.;
        let mut year_principal = 0.;
        let mut months_in_year = 0;

        while months_in_year < MONTHS_PER_YEAR && month <= term && remaining > 0. {
            let interest = interest_payment(remaining, rate);
            let scheduled = payment - interest;

            // the last month of the term clears whatever rounding left behind
            let principal = if month == term {
                remaining
            } else {
                scheduled.min(remaining).max(0.)
            };
            let paid = if principal == scheduled {
                payment
            } else {
                interest + principal
            };

            remaining -= principal;
            total_interest += interest;
            total_principal += principal;
            year_interest += interest;
            year_principal += principal;

            trace!(
                "month {}, payment {}, interest {}, principal {}, balance {}",
                month,
                paid,
                interest,
                principal,
                remaining
            );
            entries.push(LedgerEntry::new(
                month, year, paid, interest, principal, remaining,
            ));

            month += 1;
            months_in_year += 1;
        }

        let mut extra = 0.;
        if remaining > 0. && month <= term {
            extra = extra_payment(remaining, params.yearly_extra);
            remaining -= extra;
            total_principal += extra;
            year_principal += extra;
            if extra > 0. {
                debug!(
                    "year {}: extra payment {:.2}, balance {:.2}",
                    year, extra, remaining
                );
            }
        }

        years.push(YearlySummary::new(
            year,
            months_in_year,
            year_interest,
            year_principal,
            extra,
            remaining,
        ));
        year += 1;
    }

    let schedule = Schedule {
        params: *params,
        entries,
        years,
        total_interest: round(total_interest, DEC_PLACES),
        total_principal: round(total_principal, DEC_PLACES),
    };
    info!(
        "schedule complete: {} payments, total interest {:.2}, total principal {:.2}",
        schedule.get_pmt_count(),
        schedule.total_interest,
        schedule.total_principal
    );
    schedule
}
