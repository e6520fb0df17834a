use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("failed to open `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}`: expected {expected}")]
    InvalidValue {
        value: String,
        expected: &'static str,
    },
}
