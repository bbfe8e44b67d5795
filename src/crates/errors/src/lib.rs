pub mod load;
pub mod validation;

use crate::load::LoadError;
use crate::validation::{ScenarioValidationError, ValidationError};
use config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("mapping catalogue failed to load: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    ScenarioValidation(#[from] ScenarioValidationError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}
