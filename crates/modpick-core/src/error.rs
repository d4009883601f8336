use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModpickError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

pub type Result<T> = std::result::Result<T, ModpickError>;
