//! Voice Store Port - 本地音色库
//!
//! 本地音色库只追加：本系统不会删除或改写已存在的音色文件

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::voice::{VoiceAssetPair, VoiceId};

#[derive(Debug, Error)]
pub enum VoiceStoreError {
    #[error("IO error: {0}")]
    IoError(String),
}

#[async_trait]
pub trait VoiceStorePort: Send + Sync {
    /// 音色库根目录
    fn root(&self) -> &Path;

    /// 确保根目录存在（幂等）
    async fn ensure_root(&self) -> Result<(), VoiceStoreError>;

    /// 模型和配置同时存在时返回两个路径，缺任意一个都视为未安装
    async fn find(&self, voice: &VoiceId) -> Option<VoiceAssetPair>;

    /// 已安装音色列表（按模型文件列出，去掉后缀，已排序）
    async fn list_installed(&self) -> Result<Vec<String>, VoiceStoreError>;
}
