use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(String),

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("{model} record is missing required field {field}")]
    MissingField {
        model: &'static str,
        field: &'static str,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid utf8 in stored key: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<rocksdb::Error> for Error {
    fn from(err: rocksdb::Error) -> Self {
        Error::Database(err.to_string())
    }
}
