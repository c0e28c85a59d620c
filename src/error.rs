use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Payee identifier is empty")]
    EmptyIdentifier,
    #[error("Malformed payee identifier: {0}")]
    MalformedIdentifier(String),
    #[error("Field {tag} value is {len} characters long, at most 99 fit the length prefix")]
    FieldTooLong { tag: String, len: usize },
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("Checksum mismatch: payload carries {found}, computed {computed}")]
    ChecksumMismatch { found: String, computed: String },
    #[error("Invalid record in sheet '{sheet}': {reason}")]
    InvalidRecord { sheet: String, reason: String },
    #[error("Invalid sheet name '{0}'")]
    InvalidSheet(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for ShopError {
    fn from(err: rocksdb::Error) -> Self {
        ShopError::InternalError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
