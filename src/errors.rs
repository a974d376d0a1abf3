use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("stream interrupted: {0}")]
    Stream(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("failed to start logger: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

pub type ChatResult<T> = Result<T, ChatError>;

impl ChatError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ChatError::Config(msg.into())
    }

    pub fn stream_error(msg: impl Into<String>) -> Self {
        ChatError::Stream(msg.into())
    }
}
