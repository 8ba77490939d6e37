use std::io;
use thiserror::Error;

use crate::models::PostId;

#[derive(Debug, Error)]
pub enum PostlineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Terminal error: {0}")]
    Terminal(String),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    #[error("Post {0} not found")]
    PostNotFound(PostId),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PostlineError>;
