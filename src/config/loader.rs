//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（voicegate.toml / voicegate.local.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["voicegate", "voicegate.local"];

/// 使用配置的服务，决定校验和打印哪些段落
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Tts,
    Stt,
}

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICEGATE_`，层级分隔符 `__`）
/// 2. 配置文件（voicegate.toml 或 voicegate.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICEGATE_TTS__PORT=5000`
/// - `VOICEGATE_TTS__VOICES_DIR=/srv/voices`
/// - `VOICEGATE_STT__DEVICE=cpu`
/// - `VOICEGATE_LOG__JSON=true`
///
/// 只校验 `service` 用到的段落，另一个服务的配置错误不影响启动
pub fn load_config(service: Service) -> Result<AppConfig, ConfigError> {
    load_config_from_path(None, service)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
/// - `service` - 决定校验哪些段落
pub fn load_config_from_path(
    config_path: Option<&Path>,
    service: Service,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    let defaults = AppConfig::default();
    builder = builder
        .set_default("tts.host", defaults.tts.host.as_str())?
        .set_default("tts.port", u64::from(defaults.tts.port))?
        .set_default("tts.voices_dir", defaults.tts.voices_dir.to_string_lossy().into_owned())?
        .set_default("tts.default_voice", defaults.tts.default_voice.as_str())?
        .set_default("tts.engine_bin", defaults.tts.engine_bin.as_str())?
        .set_default("tts.engine_timeout_secs", defaults.tts.engine_timeout_secs)?
        .set_default("tts.model_suffix", defaults.tts.model_suffix.as_str())?
        .set_default("tts.config_suffix", defaults.tts.config_suffix.as_str())?
        .set_default("voices.base_url", defaults.voices.base_url.as_str())?
        .set_default("voices.download_timeout_secs", defaults.voices.download_timeout_secs)?
        .set_default("stt.host", defaults.stt.host.as_str())?
        .set_default("stt.port", u64::from(defaults.stt.port))?
        .set_default("stt.engine_bin", defaults.stt.engine_bin.as_str())?
        .set_default("stt.model", defaults.stt.model.as_str())?
        .set_default("stt.device", defaults.stt.device.as_str())?
        .set_default("stt.compute_type", defaults.stt.compute_type.as_str())?
        .set_default("stt.engine_timeout_secs", defaults.stt.engine_timeout_secs)?
        .set_default(
            "storage.scratch_dir",
            defaults.storage.scratch_dir.to_string_lossy().into_owned(),
        )?
        .set_default("storage.max_upload_size", defaults.storage.max_upload_size)?
        .set_default("log.level", defaults.log.level.as_str())?
        .set_default("log.json", defaults.log.json)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: VOICEGATE_TTS__DEFAULT_VOICE=de_DE-thorsten-medium
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("VOICEGATE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config, service)?;

    Ok(app_config)
}

fn require_non_empty(value: &str, name: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            name
        )));
    }
    Ok(())
}

/// 验证配置有效性
///
/// `tts.default_voice` 允许为空，请求时再报告配置错误
fn validate_config(config: &AppConfig, service: Service) -> Result<(), ConfigError> {
    match service {
        Service::Tts => validate_tts(config),
        Service::Stt => validate_stt(config),
    }
}

fn validate_tts(config: &AppConfig) -> Result<(), ConfigError> {
    if config.tts.port == 0 {
        return Err(ConfigError::ValidationError(
            "TTS port cannot be 0".to_string(),
        ));
    }

    require_non_empty(&config.tts.engine_bin, "tts.engine_bin")?;
    require_non_empty(&config.tts.model_suffix, "tts.model_suffix")?;
    require_non_empty(&config.tts.config_suffix, "tts.config_suffix")?;
    if config.tts.model_suffix == config.tts.config_suffix {
        return Err(ConfigError::ValidationError(
            "tts.model_suffix and tts.config_suffix must differ".to_string(),
        ));
    }
    if config.tts.engine_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tts.engine_timeout_secs cannot be 0".to_string(),
        ));
    }

    require_non_empty(&config.voices.base_url, "voices.base_url")
}

fn validate_stt(config: &AppConfig) -> Result<(), ConfigError> {
    if config.stt.port == 0 {
        return Err(ConfigError::ValidationError(
            "STT port cannot be 0".to_string(),
        ));
    }

    require_non_empty(&config.stt.engine_bin, "stt.engine_bin")?;
    require_non_empty(&config.stt.model, "stt.model")
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig, service: Service) {
    tracing::info!("=== Application Configuration ===");
    match service {
        Service::Tts => {
            tracing::info!("Server: {}", config.tts.addr());
            tracing::info!("Voices Directory: {:?}", config.tts.voices_dir);
            tracing::info!("Default Voice: {}", config.tts.default_voice);
            tracing::info!("Engine: {}", config.tts.engine_bin);
            tracing::info!("Engine Timeout: {}s", config.tts.engine_timeout_secs);
            tracing::info!("Voice Repository: {}", config.voices.base_url);
        }
        Service::Stt => {
            tracing::info!("Server: {}", config.stt.addr());
            tracing::info!("Engine: {}", config.stt.engine_bin);
            tracing::info!(
                "Model: {} ({}, {})",
                config.stt.model,
                config.stt.device,
                config.stt.compute_type
            );
            if config.stt.engine_timeout_secs > 0 {
                tracing::info!("Engine Timeout: {}s", config.stt.engine_timeout_secs);
            }
        }
    }
    tracing::info!("Scratch Directory: {:?}", config.storage.scratch_dir);
    tracing::info!("Max Upload Size: {} bytes", config.storage.max_upload_size);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
