//! 应用层错误定义
//!
//! 合成与转写用例的统一错误类型

use std::time::Duration;
use thiserror::Error;

use crate::application::ports::{format_timeout, ProcessError, RecognitionError, VoiceStoreError};
use crate::domain::voice::VoiceError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 必需的配置项未设置
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 客户端输入无效（空文本、缺少上传文件等）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 下载尝试之后仍然缺少音色文件
    #[error("Voice unavailable: {voice}{}", reason.as_deref().map(|r| format!(" ({})", r)).unwrap_or_default())]
    VoiceUnavailable {
        voice: String,
        reason: Option<String>,
    },

    /// 外部引擎异常退出
    #[error("Engine failure: {0}")]
    EngineFailure(String),

    /// 外部引擎超时
    #[error("Engine timed out after {}", format_timeout(*.0))]
    Timeout(Duration),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    /// 创建引擎错误
    pub fn engine(message: impl Into<String>) -> Self {
        Self::EngineFailure(message.into())
    }

    /// 创建存储错误
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError(message.into())
    }
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<VoiceStoreError> for ApplicationError {
    fn from(err: VoiceStoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<ProcessError> for ApplicationError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Timeout { after, .. } => Self::Timeout(after),
            other => Self::EngineFailure(other.to_string()),
        }
    }
}

impl From<RecognitionError> for ApplicationError {
    fn from(err: RecognitionError) -> Self {
        match err {
            RecognitionError::Timeout(after) => Self::Timeout(after),
            other => Self::EngineFailure(other.to_string()),
        }
    }
}
