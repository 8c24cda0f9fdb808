//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::voice::VoiceFileLayout;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 合成服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 远程音色仓库配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 转写服务配置
    #[serde(default)]
    pub stt: SttConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 合成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_tts_port")]
    pub port: u16,

    /// 本地音色库目录
    #[serde(default = "default_voices_dir")]
    pub voices_dir: PathBuf,

    /// 默认音色
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// 合成引擎可执行文件
    #[serde(default = "default_tts_engine_bin")]
    pub engine_bin: String,

    /// 合成超时（秒）
    #[serde(default = "default_tts_timeout")]
    pub engine_timeout_secs: u64,

    /// 模型文件后缀
    #[serde(default = "default_model_suffix")]
    pub model_suffix: String,

    /// 配置文件后缀
    #[serde(default = "default_config_suffix")]
    pub config_suffix: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_tts_port() -> u16 {
    5000
}

fn default_voices_dir() -> PathBuf {
    PathBuf::from("data/voices")
}

fn default_voice() -> String {
    "en_US-lessac-medium".to_string()
}

fn default_tts_engine_bin() -> String {
    "piper".to_string()
}

fn default_tts_timeout() -> u64 {
    60
}

fn default_model_suffix() -> String {
    ".onnx".to_string()
}

fn default_config_suffix() -> String {
    ".onnx.json".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_tts_port(),
            voices_dir: default_voices_dir(),
            default_voice: default_voice(),
            engine_bin: default_tts_engine_bin(),
            engine_timeout_secs: default_tts_timeout(),
            model_suffix: default_model_suffix(),
            config_suffix: default_config_suffix(),
        }
    }
}

impl TtsConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }

    pub fn layout(&self) -> VoiceFileLayout {
        VoiceFileLayout::new(&self.model_suffix, &self.config_suffix)
    }
}

/// 远程音色仓库配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 仓库基础 URL（其下有 voices.json）
    #[serde(default = "default_voices_base_url")]
    pub base_url: String,

    /// 下载超时（秒）
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

fn default_voices_base_url() -> String {
    "https://huggingface.co/rhasspy/piper-voices/resolve/v1.0.0".to_string()
}

fn default_download_timeout() -> u64 {
    300
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            base_url: default_voices_base_url(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

/// 转写服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct SttConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_stt_port")]
    pub port: u16,

    /// 识别引擎可执行文件
    #[serde(default = "default_stt_engine_bin")]
    pub engine_bin: String,

    /// 识别模型
    #[serde(default = "default_stt_model")]
    pub model: String,

    /// 推理设备
    #[serde(default = "default_stt_device")]
    pub device: String,

    /// 计算精度
    #[serde(default = "default_stt_compute_type")]
    pub compute_type: String,

    /// 识别超时（秒），0 表示不限时
    #[serde(default)]
    pub engine_timeout_secs: u64,
}

fn default_stt_port() -> u16 {
    9000
}

fn default_stt_engine_bin() -> String {
    "whisper-ctranslate2".to_string()
}

fn default_stt_model() -> String {
    "large-v3".to_string()
}

fn default_stt_device() -> String {
    "cuda".to_string()
}

fn default_stt_compute_type() -> String {
    "float16".to_string()
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_stt_port(),
            engine_bin: default_stt_engine_bin(),
            model: default_stt_model(),
            device: default_stt_device(),
            compute_type: default_stt_compute_type(),
            engine_timeout_secs: 0,
        }
    }
}

impl SttConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 临时文件目录
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,

    /// 上传文件最大大小（字节），默认 100MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_max_upload_size() -> u64 {
    100 * 1024 * 1024 // 100 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            scratch_dir: default_scratch_dir(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
