//! The module contains the error the engine can throw.
//!
//! Allocation errors are raised before any [`Split`] exists:
//!
//! - [`PayerNotInGroup`] the payer is not a member of the expense group.
//! - [`MissingSplitsForPercentagePolicy`] a percentage expense without shares.
//! - [`PercentageSumMismatch`] the shares do not add up to 100%.
//! - [`UnknownMember`] a share names somebody outside the group.
//!
//! Balances and settlements never fail on their own; the remaining variants
//! come from the persistence side of the [`Engine`].
//!
//!  [`PayerNotInGroup`]: EngineError::PayerNotInGroup
//!  [`MissingSplitsForPercentagePolicy`]: EngineError::MissingSplitsForPercentagePolicy
//!  [`PercentageSumMismatch`]: EngineError::PercentageSumMismatch
//!  [`UnknownMember`]: EngineError::UnknownMember
//!  [`Split`]: super::Split
//!  [`Engine`]: super::Engine
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Payer is not in the group: {0}")]
    PayerNotInGroup(String),
    #[error("Splits are required for percentage-based expenses")]
    MissingSplitsForPercentagePolicy,
    #[error("Percentages must sum to 100, got {0}")]
    PercentageSumMismatch(String),
    #[error("\"{0}\" is not a member of the group")]
    UnknownMember(String),
    #[error("\"{0}\" appears more than once in the splits")]
    DuplicateShare(String),
    #[error("Split amounts must sum to the expense amount: {0}")]
    SplitSumMismatch(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid group: {0}")]
    InvalidGroup(String),
    #[error("Invalid description: {0}")]
    InvalidDescription(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Invalid split kind: {0}")]
    InvalidSplitKind(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::PayerNotInGroup(a), Self::PayerNotInGroup(b)) => a == b,
            (Self::MissingSplitsForPercentagePolicy, Self::MissingSplitsForPercentagePolicy) => {
                true
            }
            (Self::PercentageSumMismatch(a), Self::PercentageSumMismatch(b)) => a == b,
            (Self::UnknownMember(a), Self::UnknownMember(b)) => a == b,
            (Self::DuplicateShare(a), Self::DuplicateShare(b)) => a == b,
            (Self::SplitSumMismatch(a), Self::SplitSumMismatch(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidGroup(a), Self::InvalidGroup(b)) => a == b,
            (Self::InvalidDescription(a), Self::InvalidDescription(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::InvalidSplitKind(a), Self::InvalidSplitKind(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
