use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single structured validation complaint, named by the field that failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulated mapping-shape validation errors for a single mapping.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[error("mapping failed validation: {errors:?}")]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

/// Accumulated scenario state-machine validation errors, raised once after
/// the full catalogue has been loaded.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[error("scenario states failed validation: {errors:?}")]
pub struct ScenarioValidationError {
    pub errors: Vec<FieldError>,
}

impl ScenarioValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}
