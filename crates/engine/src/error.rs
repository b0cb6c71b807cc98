//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when an expense does not exist.
//! - [`InvalidId`], [`InvalidName`], [`InvalidAmount`] and [`InvalidDate`] thrown by the
//!   validators before anything reaches the database.
//! - [`Database`] wrapping any failure of the underlying store.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidId`]: EngineError::InvalidId
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    KeyNotFound(String),
    #[error("{0}")]
    InvalidId(String),
    #[error("{0}")]
    InvalidName(String),
    #[error("{0}")]
    InvalidAmount(String),
    #[error("{0}")]
    InvalidDate(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// `true` for the errors produced by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidId(_) | Self::InvalidName(_) | Self::InvalidAmount(_) | Self::InvalidDate(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
