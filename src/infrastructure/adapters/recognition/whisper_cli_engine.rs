//! Whisper CLI Engine - 通过 faster-whisper 命令行识别语音
//!
//! 实现 RecognitionEnginePort，命令行与 `whisper-ctranslate2` 兼容:
//!
//! ```text
//! whisper-ctranslate2 <audio> --model large-v3 --device cuda --compute_type float16 \
//!     --output_format json --output_dir <dir> [--language de]
//! ```
//!
//! 引擎在 `<dir>/<audio stem>.json` 写出 `{ "text", "segments": [{ "text", ... }], "language" }`

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    ProcessError, ProcessInvocation, ProcessRunnerPort, Recognition, RecognitionEnginePort,
    RecognitionError,
};
use crate::domain::transcript::{DetectedLanguage, LanguageHint, TranscriptSegment};

/// Whisper CLI 配置
#[derive(Debug, Clone)]
pub struct WhisperCliConfig {
    /// 可执行文件
    pub engine_bin: String,
    /// 模型标识（如 large-v3）
    pub model: String,
    /// 设备（cuda / cpu / auto）
    pub device: String,
    /// 计算精度（float16 / int8 ...）
    pub compute_type: String,
    /// 超时（秒），0 表示不限时
    pub timeout_secs: u64,
}

impl Default for WhisperCliConfig {
    fn default() -> Self {
        Self {
            engine_bin: "whisper-ctranslate2".to_string(),
            model: "large-v3".to_string(),
            device: "cuda".to_string(),
            compute_type: "float16".to_string(),
            timeout_secs: 0,
        }
    }
}

impl WhisperCliConfig {
    fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Deserialize)]
struct WhisperOutput {
    #[serde(default)]
    segments: Vec<WhisperSegment>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    #[serde(default)]
    text: String,
}

pub struct WhisperCliEngine {
    config: WhisperCliConfig,
    runner: Arc<dyn ProcessRunnerPort>,
}

impl WhisperCliEngine {
    pub fn new(config: WhisperCliConfig, runner: Arc<dyn ProcessRunnerPort>) -> Self {
        Self { config, runner }
    }

    fn invocation(&self, audio_path: &Path, output_dir: &Path, language: &LanguageHint) -> ProcessInvocation {
        let mut invocation = ProcessInvocation::new(&self.config.engine_bin)
            .arg(audio_path)
            .arg("--model")
            .arg(&self.config.model)
            .arg("--device")
            .arg(&self.config.device)
            .arg("--compute_type")
            .arg(&self.config.compute_type)
            .arg("--output_format")
            .arg("json")
            .arg("--output_dir")
            .arg(output_dir);
        if let Some(code) = language.code() {
            invocation = invocation.arg("--language").arg(code);
        }
        invocation.with_timeout(self.config.timeout())
    }
}

/// 输出文件：优先 `<stem>.json`，否则取目录中唯一的 json
async fn locate_output(output_dir: &Path, audio_path: &Path) -> Option<PathBuf> {
    if let Some(stem) = audio_path.file_stem() {
        let mut name = stem.to_os_string();
        name.push(".json");
        let expected = output_dir.join(name);
        if tokio::fs::metadata(&expected).await.is_ok() {
            return Some(expected);
        }
    }

    let mut entries = tokio::fs::read_dir(output_dir).await.ok()?;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            return Some(path);
        }
    }
    None
}

#[async_trait]
impl RecognitionEnginePort for WhisperCliEngine {
    async fn recognize(
        &self,
        audio_path: &Path,
        language: &LanguageHint,
    ) -> Result<Recognition, RecognitionError> {
        // 每次调用独立的输出目录，Drop 时整体删除
        let scratch_root = audio_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(std::env::temp_dir);
        let output_dir = tempfile::Builder::new()
            .prefix("voicegate-stt-")
            .tempdir_in(&scratch_root)
            .map_err(|e| RecognitionError::EngineFailed(format!("Failed to create output dir: {}", e)))?;

        let invocation = self.invocation(audio_path, output_dir.path(), language);
        tracing::debug!(
            engine = %self.config.engine_bin,
            model = %self.config.model,
            device = %self.config.device,
            args = ?invocation.args_lossy(),
            "Running recognition engine"
        );

        let output = self.runner.run(invocation).await.map_err(|e| match e {
            ProcessError::Timeout { after, .. } => RecognitionError::Timeout(after),
            other => RecognitionError::EngineFailed(other.to_string()),
        })?;

        if !output.success() {
            return Err(RecognitionError::EngineFailed(format!(
                "{} exited with {:?}: {}",
                self.config.engine_bin, output.exit_code, output.stderr
            )));
        }

        let json_path = locate_output(output_dir.path(), audio_path)
            .await
            .ok_or_else(|| RecognitionError::InvalidOutput("engine wrote no JSON output".to_string()))?;
        let raw = tokio::fs::read(&json_path)
            .await
            .map_err(|e| RecognitionError::InvalidOutput(e.to_string()))?;
        let parsed: WhisperOutput = serde_json::from_slice(&raw)
            .map_err(|e| RecognitionError::InvalidOutput(e.to_string()))?;

        let language = parsed
            .language
            .filter(|l| !l.is_empty())
            .ok_or_else(|| RecognitionError::InvalidOutput("missing detected language".to_string()))?;

        Ok(Recognition {
            info: DetectedLanguage { language },
            segments: Box::new(
                parsed
                    .segments
                    .into_iter()
                    .map(|segment| TranscriptSegment::new(segment.text)),
            ),
        })
    }
}
