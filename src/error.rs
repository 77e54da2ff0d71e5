use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No such classifier: {0}")]
    UnknownClassifier(String),

    #[error("Invalid options for classifier '{classifier}': {message}")]
    InvalidOptions { classifier: String, message: String },

    #[error("Failed to decode sample: {0}")]
    Decode(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Port file error: {0}")]
    PortFile(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ActivationError {
    /// True for errors raised while validating configuration, before any
    /// sample is read.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ActivationError::InvalidParameter(_)
                | ActivationError::UnknownClassifier(_)
                | ActivationError::InvalidOptions { .. }
                | ActivationError::PortFile(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ActivationError>;
