use thiserror::Error;

/// Mock server startup errors
#[derive(Debug, Error)]
pub enum MockError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid {name}: {value}")]
    Config { name: &'static str, value: String },
}
