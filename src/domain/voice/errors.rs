//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Voice identifier cannot be empty")]
    EmptyId,

    #[error("Invalid voice identifier: {0}")]
    InvalidId(String),
}
