use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrownError {
    #[error("deployment failed: no free cell found for unit {unit} after {tries} tries")]
    DeploymentFailed {
        unit: crate::core::types::UnitId,
        tries: u32,
    },

    #[error("grid of {map_size}x{map_size} cannot hold {unit_count} units")]
    GridTooSmall { map_size: u32, unit_count: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrownError>;
