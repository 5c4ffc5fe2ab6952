use log::debug;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::error::{LoanError, Result};
use crate::loan::LoanParams;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Field {
    Amount,
    Rate,
    Term,
    Extra,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Rate => "rate",
            Field::Term => "term",
            Field::Extra => "extra",
        }
    }

    fn prompt(&self) -> &'static str {
        match self {
            Field::Amount => "Loan amount (EUR)",
            Field::Rate => "Annual interest rate (%)",
            Field::Term => "Number of monthly payments",
            Field::Extra => "Yearly extra payment (EUR)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Values used when an answer is left empty or input is unavailable.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Defaults {
    pub amount: f64,
    pub rate: f64,
    pub term: u32,
    pub extra: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            amount: 76874.,
            rate: 5.0,
            term: 317,
            extra: 0.,
        }
    }
}

/// Loan terms as a user enters them: annual rate in percent.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LoanInput {
    pub amount: f64,
    pub annual_rate: f64,
    pub term: u32,
    pub extra: f64,
}

impl LoanInput {
    pub fn into_params(self, start_year: i32) -> Result<LoanParams> {
        LoanParams::from_annual_rate(
            self.amount,
            self.annual_rate,
            self.term,
            self.extra,
            start_year,
        )
    }
}

impl From<Defaults> for LoanInput {
    fn from(d: Defaults) -> Self {
        Self {
            amount: d.amount,
            annual_rate: d.rate,
            term: d.term,
            extra: d.extra,
        }
    }
}

fn parse_number<T: FromStr>(field: Field, text: &str, expected: &str) -> Result<T> {
    text.trim()
        .parse::<T>()
        .map_err(|_| LoanError::InvalidNumber {
            field: field.name().into(),
            input: text.trim().into(),
            expected: expected.into(),
        })
}

/// Parses a money amount or percentage. The loan amount must be positive,
/// everything else only non-negative.
pub fn parse_amount(field: Field, text: &str) -> Result<f64> {
    let amt: f64 = parse_number(field, text, "a number")?;
    if !amt.is_finite() {
        return Err(LoanError::invalid(field.name(), "must be a finite number"));
    }
    if amt < 0. {
        return Err(LoanError::invalid(field.name(), "must not be negative"));
    }
    if field == Field::Amount && amt == 0. {
        return Err(LoanError::invalid(field.name(), "must be greater than zero"));
    }
    Ok(amt)
}

pub fn parse_term(text: &str) -> Result<u32> {
    let term: u32 = parse_number(Field::Term, text, "a whole number of months")?;
    if term == 0 {
        return Err(LoanError::invalid(
            Field::Term.name(),
            "must be at least one month",
        ));
    }
    Ok(term)
}

pub fn parse_args(amount: &str, rate: &str, term: &str, extra: &str) -> Result<LoanInput> {
    Ok(LoanInput {
        amount: parse_amount(Field::Amount, amount)?,
        annual_rate: parse_amount(Field::Rate, rate)?,
        term: parse_term(term)?,
        extra: parse_amount(Field::Extra, extra)?,
    })
}

/// Asks for each loan term in turn, repeating a question until it gets a
/// valid answer. An empty line or end of input takes the default.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// With `interactive` false the questions are not printed, but rejected
    /// answers are still reported.
    pub fn new(reader: R, writer: W, interactive: bool) -> Self {
        Self {
            reader,
            writer,
            interactive,
        }
    }

    fn ask<T, F>(&mut self, field: Field, default: T, parse: F) -> io::Result<T>
    where
        T: fmt::Display + Copy,
        F: Fn(&str) -> Result<T>,
    {
        loop {
            if self.interactive {
                write!(self.writer, "{} [{}]: ", field.prompt(), default)?;
                self.writer.flush()?;
            }

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                debug!("end of input, using default {} {}", field, default);
                return Ok(default);
            }
            let answer = line.trim();
            if answer.is_empty() {
                return Ok(default);
            }

            match parse(answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.writer, "{}, try again", e)?,
            }
        }
    }

    pub fn prompt_loan(&mut self, defaults: &Defaults) -> io::Result<LoanInput> {
        let amount = self.ask(Field::Amount, defaults.amount, |s| {
            parse_amount(Field::Amount, s)
        })?;
        let annual_rate = self.ask(Field::Rate, defaults.rate, |s| parse_amount(Field::Rate, s))?;
        let term = self.ask(Field::Term, defaults.term, parse_term)?;
        let extra = self.ask(Field::Extra, defaults.extra, |s| {
            parse_amount(Field::Extra, s)
        })?;

        Ok(LoanInput {
            amount,
            annual_rate,
            term,
            extra,
        })
    }
}
