pub mod error;
pub mod input;
pub mod loan;
pub mod report;

pub use error::{LoanError, Result};
