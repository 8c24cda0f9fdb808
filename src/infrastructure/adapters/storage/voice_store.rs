//! File Voice Store - 文件系统音色库实现
//!
//! 实现 VoiceStorePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{VoiceStoreError, VoiceStorePort};
use crate::domain::voice::{VoiceAssetPair, VoiceFileLayout, VoiceId};

/// 文件系统音色库
pub struct FileVoiceStore {
    /// 音色库根目录
    root: PathBuf,
    /// 文件命名规则
    layout: VoiceFileLayout,
}

impl FileVoiceStore {
    /// 创建音色库（不会创建目录，首次解析时再创建）
    ///
    /// 根目录会被转换为绝对路径，保证返回给引擎的路径与工作目录无关
    pub fn new(root: impl AsRef<Path>, layout: VoiceFileLayout) -> Self {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(root))
                .unwrap_or_else(|_| root.to_path_buf())
        };
        Self { root, layout }
    }

    pub fn layout(&self) -> &VoiceFileLayout {
        &self.layout
    }
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

#[async_trait]
impl VoiceStorePort for FileVoiceStore {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_root(&self) -> Result<(), VoiceStoreError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| VoiceStoreError::IoError(format!("{}: {}", self.root.display(), e)))
    }

    async fn find(&self, voice: &VoiceId) -> Option<VoiceAssetPair> {
        let pair = self.layout.asset_pair(&self.root, voice);
        if is_file(&pair.model_path).await && is_file(&pair.config_path).await {
            Some(pair)
        } else {
            None
        }
    }

    async fn list_installed(&self) -> Result<Vec<String>, VoiceStoreError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(VoiceStoreError::IoError(e.to_string())),
        };

        let mut voices = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| VoiceStoreError::IoError(e.to_string()))?
        {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(voice) = self.layout.voice_from_model_file(file_name) {
                voices.push(voice);
            }
        }

        voices.sort();
        Ok(voices)
    }
}
