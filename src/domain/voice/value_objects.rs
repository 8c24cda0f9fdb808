//! Voice Context - Value Objects

use std::path::{Path, PathBuf};

use super::VoiceError;

/// 音色标识（如 `en_US-lessac-medium`）
///
/// 不变量:
/// - 非空白
/// - 不含路径分隔符，不含 `..`（标识直接作为本地音色库中的文件名）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, VoiceError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(VoiceError::EmptyId);
        }
        if id.contains('/') || id.contains('\\') || id.contains("..") || id.contains('\0') {
            return Err(VoiceError::InvalidId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 已安装音色的两个文件：模型 + 配置
///
/// 两个路径必须同时存在才算已安装
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceAssetPair {
    pub model_path: PathBuf,
    pub config_path: PathBuf,
}

/// 音色文件命名规则
///
/// 每个音色在本地音色库中对应 `{voice}{model_suffix}` 和 `{voice}{config_suffix}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceFileLayout {
    pub model_suffix: String,
    pub config_suffix: String,
}

impl Default for VoiceFileLayout {
    fn default() -> Self {
        Self {
            model_suffix: ".onnx".to_string(),
            config_suffix: ".onnx.json".to_string(),
        }
    }
}

impl VoiceFileLayout {
    pub fn new(model_suffix: impl Into<String>, config_suffix: impl Into<String>) -> Self {
        Self {
            model_suffix: model_suffix.into(),
            config_suffix: config_suffix.into(),
        }
    }

    pub fn model_file_name(&self, voice: &VoiceId) -> String {
        format!("{}{}", voice.as_str(), self.model_suffix)
    }

    pub fn config_file_name(&self, voice: &VoiceId) -> String {
        format!("{}{}", voice.as_str(), self.config_suffix)
    }

    /// 计算某个音色在指定目录下的文件路径（不检查是否存在）
    pub fn asset_pair(&self, root: &Path, voice: &VoiceId) -> VoiceAssetPair {
        VoiceAssetPair {
            model_path: root.join(self.model_file_name(voice)),
            config_path: root.join(self.config_file_name(voice)),
        }
    }

    /// 从模型文件名还原音色标识，不是模型文件时返回 None
    ///
    /// 配置后缀可能以模型后缀开头（`.onnx.json` vs `.onnx`），这里只接受以模型后缀结尾的文件名
    pub fn voice_from_model_file(&self, file_name: &str) -> Option<String> {
        let stem = file_name.strip_suffix(&self.model_suffix)?;
        if stem.is_empty() {
            return None;
        }
        Some(stem.to_string())
    }
}
