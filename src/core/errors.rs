use thiserror::Error;

#[derive(Error, Debug)]
pub enum TadokuError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Zip error: {0}")]
    Zip(Box<zip::result::ZipError>),

    #[error("Cache encode error: {0}")]
    CacheEncode(#[from] bincode::error::EncodeError),

    #[error("Cache decode error: {0}")]
    CacheDecode(#[from] bincode::error::DecodeError),

    #[error("Vibrato error: {0}")]
    Vibrato(Box<vibrato::errors::VibratoError>),

    #[error("Analyzer error: {0}")]
    Analyzer(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Malformed stored data for '{key}': {reason}")]
    MalformedData { key: String, reason: String },

    #[error("Story {0} does not exist")]
    StoryNotFound(i64),

    #[error("Word {0} does not exist")]
    WordNotFound(i64),

    #[error("Invalid story status: {0}")]
    InvalidStatus(String),

    #[error("TadokuError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for TadokuError {
    fn from(error: std::io::Error) -> Self {
        TadokuError::Io(Box::new(error))
    }
}

impl From<zip::result::ZipError> for TadokuError {
    fn from(error: zip::result::ZipError) -> Self {
        TadokuError::Zip(Box::new(error))
    }
}

impl From<vibrato::errors::VibratoError> for TadokuError {
    fn from(error: vibrato::errors::VibratoError) -> Self {
        TadokuError::Vibrato(Box::new(error))
    }
}

impl<T> From<std::sync::PoisonError<T>> for TadokuError {
    fn from(error: std::sync::PoisonError<T>) -> Self {
        TadokuError::Store(format!("lock poisoned: {}", error))
    }
}
