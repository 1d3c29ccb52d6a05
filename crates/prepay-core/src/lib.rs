pub mod annuity;
pub mod error;
pub mod schedule;
pub mod types;

pub use error::PrepayError;
pub use types::*;

/// Standard result type for all prepay operations
pub type PrepayResult<T> = Result<T, PrepayError>;
