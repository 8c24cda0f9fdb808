//! Voice Fetcher Port - 远程音色下载

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::voice::VoiceId;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Voice not found in catalog: {0}")]
    UnknownVoice(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Checksum mismatch for {file}: expected {expected}, got {actual}")]
    Integrity {
        file: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Voice Fetcher Port
///
/// 把一个音色的模型和配置下载到目标目录，同时刷新目标目录下的音色目录缓存
#[async_trait]
pub trait VoiceFetcherPort: Send + Sync {
    async fn fetch(&self, voice: &VoiceId, target_dir: &Path) -> Result<(), FetchError>;
}
