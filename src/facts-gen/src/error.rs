use std::result;

use thiserror::Error;
pub type Result<T> = result::Result<T, FactsGenError>;

#[derive(Error, Debug)]
pub enum FactsGenError {
    #[error("expected column {0:?} in titles csv")]
    MissingColumn(String),
    #[error("titles catalog is empty")]
    EmptyCatalog,
    #[error(
        "NotEnoughTitles: requested {requested}, only {available} title(s) with nonzero weight"
    )]
    NotEnoughTitles { requested: usize, available: usize },
    #[error("InvalidDistribution: {0:?}")]
    InvalidDistribution(String),
    #[error("CSVError: {0:?}")]
    CSVError(#[from] csv::Error),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("General {0:?}")]
    General(String),
}
