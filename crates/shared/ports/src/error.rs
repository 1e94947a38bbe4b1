use rust_decimal::Decimal;
use thiserror::Error;

/// Domain-level errors for round settlement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid multiplier: {0} (must be positive)")]
    InvalidMultiplier(Decimal),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors at the multiplier-source boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Invalid sheet range: {0} (use \"Sheet1!A1:B10\")")]
    InvalidRange(String),

    #[error("No valid numeric data in source")]
    NoData,
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;
