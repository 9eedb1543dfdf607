// models/src/errors.rs

pub use thiserror::Error;

/// A validation error raised while turning request input into a document.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field was missing or empty after trimming.
    #[error("required field '{0}' is missing or empty")]
    MissingField(&'static str),
    /// An email address failed the shape check.
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    /// A price was negative or not a finite number.
    #[error("invalid price {0}; prices must be finite and non-negative")]
    InvalidPrice(f64),
    /// A stock level was negative.
    #[error("invalid stock level {0}; stock can never be negative")]
    InvalidStock(i64),
    /// An order quantity below one was requested.
    #[error("invalid quantity {0}; orders must request at least one unit")]
    InvalidQuantity(i64),
    /// A status token did not match any known status.
    #[error("unknown status '{0}'")]
    InvalidStatus(String),
    /// A date string could not be parsed as RFC 3339.
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
}

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
