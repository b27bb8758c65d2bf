//! Utility module - common helpers and types
//!
//! # Contents
//!
//! - [`AppError`] - application error type
//! - [`AppResult`] - application result alias
//! - logger setup and money rounding helpers

pub mod error;
pub mod logger;
pub mod result;

pub use error::AppError;
pub use result::AppResult;

/// Round a currency amount to 2 decimal places
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
