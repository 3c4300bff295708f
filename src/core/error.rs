use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("weapon record truncated at offset {0}")]
    TruncatedRecord(usize),

    #[error("unsupported weapon record version: {0}")]
    UnsupportedVersion(u32),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CombatError>;
