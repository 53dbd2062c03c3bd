use crate::animals::ComponentCategory;
use thiserror::Error;

/// Error type for invalid calculations.
#[derive(Error, Debug)]
pub enum N2OError {
    #[error("Total weight of {entries} weighted-average entries is zero")]
    ZeroTotalWeight { entries: usize },
    #[error("No entry in {table} for {key}")]
    MissingLookupEntry { table: &'static str, key: String },
    #[error("Calculator has no {0} configured")]
    MissingProvider(&'static str),
    #[error("No manure result service registered for {0:?} but daily emissions were supplied")]
    MissingManureService(ComponentCategory),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Convenience type for `Result<T, N2OError>`.
pub type N2OResult<T> = Result<T, N2OError>;
