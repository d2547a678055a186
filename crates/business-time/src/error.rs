//! Error types for business-time configuration.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusinessTimeError {
    #[error("Invalid business hours: {0}")]
    InvalidBusinessHours(String),

    #[error("Invalid business days: at least one weekday is required")]
    NoBusinessDays,

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),
}

pub type Result<T> = std::result::Result<T, BusinessTimeError>;
