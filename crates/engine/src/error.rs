//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidField`] thrown when a required field is missing or malformed.
//! - [`NoFieldsToUpdate`] thrown when a patch carries no field at all.
//! - [`NegativeCount`] thrown when a count adjustment would go below zero.
//! - [`ExistingKey`] thrown when a row that must be unique already exists.
//! - [`KeyNotFound`] thrown when a scoped lookup or mutation matches no row.
//!
//!  [`InvalidField`]: EngineError::InvalidField
//!  [`NoFieldsToUpdate`]: EngineError::NoFieldsToUpdate
//!  [`NegativeCount`]: EngineError::NegativeCount
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    InvalidField(String),
    #[error("No fields to update")]
    NoFieldsToUpdate,
    #[error("Count cannot be negative")]
    NegativeCount(i64),
    #[error("{0}")]
    ExistingKey(String),
    #[error("{0} not found")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// `true` for errors caused by the caller's input rather than by storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidField(_)
                | Self::NoFieldsToUpdate
                | Self::NegativeCount(_)
                | Self::ExistingKey(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::NoFieldsToUpdate, Self::NoFieldsToUpdate) => true,
            (Self::NegativeCount(a), Self::NegativeCount(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity() {
        let err = EngineError::KeyNotFound("Purchase".to_string());
        assert_eq!(err.to_string(), "Purchase not found");
    }

    #[test]
    fn validation_classification() {
        assert!(EngineError::NoFieldsToUpdate.is_validation());
        assert!(EngineError::NegativeCount(-1).is_validation());
        assert!(!EngineError::KeyNotFound("Item".to_string()).is_validation());
        assert!(!EngineError::Database(DbErr::Custom("boom".to_string())).is_validation());
    }
}
