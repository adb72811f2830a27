use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid window size: {0} (must be greater than zero)")]
    InvalidWindowSize(usize),

    #[error("Invalid bucket duration: {0:?} (must be greater than zero)")]
    InvalidBucketDuration(Duration),

    #[error("Cannot decrease in value: {0}")]
    NegativeValue(i64),
}

pub type Result<T> = std::result::Result<T, Error>;
