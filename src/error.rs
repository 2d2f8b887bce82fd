use thiserror::Error;

#[derive(Error, Debug)]
pub enum KbdError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Could not find layout '{0}'")]
    LayoutNotFound(String),

    #[error("Could not load layout '{0}'")]
    LayoutLoadFailed(String),

    #[error("OS not supported: {0}")]
    UnsupportedPlatform(String),

    #[error("Unknown key type tag {0}")]
    UnknownKeyType(i32),

    #[error("Invalid character payload: {0}")]
    InvalidCharacters(String),

    #[error("Invalid logical layout: {0}")]
    InvalidLayout(String),

    #[error("Not a .keyboard file (bad magic)")]
    BadMagic,

    #[error("Unsupported .keyboard format version {0}")]
    UnsupportedVersion(u16),

    #[error("No exported keyboard named '{0}'")]
    KeyboardNotFound(String),
}

pub type KbdResult<T> = Result<T, KbdError>;
