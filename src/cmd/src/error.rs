use std::result;

use facts_gen::error::FactsGenError;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("FactsGen: {0}")]
    FactsGen(#[from] FactsGenError),
    #[error("Config: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("BadRequest: {0}")]
    BadRequest(String),
    #[error("FileNotFound: {0:?}")]
    FileNotFound(String),
    #[error("SetGlobalDefaultError: {0:?}")]
    SetGlobalDefaultError(#[from] SetGlobalDefaultError),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("other: {0:?}")]
    Other(#[from] anyhow::Error),
}
