use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LoanError {
    #[error("invalid argument: {field} {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("invalid {field} '{input}', expected {expected}")]
    InvalidNumber {
        field: String,
        input: String,
        expected: String,
    },
}

impl LoanError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        LoanError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
