use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettlerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No generator configuration supplied and no default registered")]
    ConfigurationMissing,

    #[error("Name catalog exhausted: no {0} available")]
    CatalogExhausted(String),

    #[error("Entity already stored: {0}")]
    DuplicateEntity(crate::core::types::EntityId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SettlerError>;
