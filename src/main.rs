use amortization::input::{self, Defaults, LoanInput, Prompter};
use amortization::loan::{compute_schedule, Schedule};
use amortization::report;
use chrono::Datelike;
use clap::Parser;
use colored::Colorize;
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;
use std::io;
use std::process;

/// Loan amortization schedule with yearly extra payments
#[derive(Parser, Debug)]
#[command(
    name = "amortize",
    version,
    about = "Loan amortization schedule with yearly extra payments",
    long_about = "Prints a month-by-month amortization schedule, yearly summaries and \
                  final totals. The monthly payment is recomputed each year, so an \
                  extra payment lowers the payments that follow it. Missing or invalid \
                  arguments are asked for interactively.",
    allow_negative_numbers = true
)]
struct Cli {
    /// Loan amount (EUR)
    amount: Option<String>,
    /// Annual interest rate in percent
    rate: Option<String>,
    /// Term in months
    term: Option<String>,
    /// Extra principal paid at the end of each year (EUR)
    extra: Option<String>,

    /// Year label of the first payment block [default: current year]
    #[arg(long)]
    start_year: Option<i32>,

    /// Print the schedule as JSON
    #[arg(long)]
    json: bool,

    /// Leave out the per-month rows
    #[arg(long)]
    no_monthly: bool,

    /// Never ask for input; use defaults for anything missing
    #[arg(long)]
    no_prompt: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log_level(cli.verbose))
        .init()?;

    let loan = gather_input(&cli)?;
    let start_year = cli
        .start_year
        .unwrap_or_else(|| chrono::Local::now().year());
    let params = loan.into_params(start_year)?;
    let schedule = compute_schedule(&params);

    if cli.json {
        print_json(&schedule)?;
    } else {
        print!("{}", report::render_to_string(&schedule, !cli.no_monthly));
    }
    Ok(())
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn warn_fallback(reason: &str, no_prompt: bool) {
    let fallback = if no_prompt {
        "using defaults"
    } else {
        "falling back to interactive input"
    };
    eprintln!("{}: {}, {}", "warning".yellow().bold(), reason, fallback);
}

fn gather_input(cli: &Cli) -> io::Result<LoanInput> {
    let defaults = Defaults::default();

    match (&cli.amount, &cli.rate, &cli.term, &cli.extra) {
        (Some(amount), Some(rate), Some(term), Some(extra)) => {
            match input::parse_args(amount, rate, term, extra) {
                Ok(loan) => return Ok(loan),
                Err(e) => warn_fallback(&e.to_string(), cli.no_prompt),
            }
        }
        (None, None, None, None) => {}
        _ => warn_fallback(
            "expected 4 arguments (amount, rate, term, extra)",
            cli.no_prompt,
        ),
    }

    if cli.no_prompt {
        debug!("prompting disabled, using defaults");
        return Ok(defaults.into());
    }

    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr(), interactive);
    prompter.prompt_loan(&defaults)
}

#[cfg(feature = "serde")]
fn print_json(schedule: &Schedule) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(schedule)?);
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_json(_schedule: &Schedule) -> Result<(), Box<dyn std::error::Error>> {
    Err("JSON output requires the `serde` feature".into())
}
