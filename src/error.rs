use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    #[error("key not found")]
    KeyNotFound,
    #[error("key already present")]
    DuplicateKey,
    #[error("table full, all {capacity} slots occupied")]
    TableFull { capacity: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("no such option: {0}")]
    Unknown(String),
    #[error("missing value for option {0}")]
    MissingValue(String),
    #[error("bad argument for {name}: {value}")]
    Invalid { name: String, value: String },
    #[error("{name} must be at least {min}, got {value}")]
    OutOfRange { name: String, value: i64, min: i64 },
}
