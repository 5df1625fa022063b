use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatumError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Key not found in store: {0}")]
    KeyNotFound(String),

    #[error("Corrupt index file: {0}")]
    CorruptIndex(String),

    #[error("Store capacity exhausted and could not be grown: {0}")]
    CapacityExhausted(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DatumError>;
