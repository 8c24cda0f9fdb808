//! Synthesis Orchestrator - 调用外部合成引擎
//!
//! 创建临时输出文件 -> 以命令行方式调用引擎（带超时）-> 读回 WAV。
//! 临时文件在所有退出路径上都会被删除。

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::error::ApplicationError;
use crate::application::ports::{ProcessInvocation, ProcessRunnerPort};
use crate::application::scratch::ScratchFile;
use crate::domain::voice::VoiceAssetPair;

/// WAV 媒体类型
pub const WAV_MEDIA_TYPE: &str = "audio/wav";

/// 合成编排配置
#[derive(Debug, Clone)]
pub struct SynthesisOrchestratorConfig {
    /// 合成引擎可执行文件
    pub engine_bin: String,
    /// 引擎超时
    pub timeout: Duration,
    /// 临时文件目录
    pub scratch_dir: PathBuf,
}

impl Default for SynthesisOrchestratorConfig {
    fn default() -> Self {
        Self {
            engine_bin: "piper".to_string(),
            timeout: Duration::from_secs(60),
            scratch_dir: std::env::temp_dir(),
        }
    }
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
}

pub struct SynthesisOrchestrator {
    config: SynthesisOrchestratorConfig,
    runner: Arc<dyn ProcessRunnerPort>,
}

impl SynthesisOrchestrator {
    pub fn new(config: SynthesisOrchestratorConfig, runner: Arc<dyn ProcessRunnerPort>) -> Self {
        Self { config, runner }
    }

    pub async fn synthesize(
        &self,
        text: &str,
        assets: &VoiceAssetPair,
    ) -> Result<SynthesizedAudio, ApplicationError> {
        let output = ScratchFile::reserve(&self.config.scratch_dir, ".wav").map_err(|e| {
            ApplicationError::storage(format!("Failed to reserve output file: {}", e))
        })?;

        let invocation = ProcessInvocation::new(&self.config.engine_bin)
            .arg("-m")
            .arg(&assets.model_path)
            .arg("-c")
            .arg(&assets.config_path)
            .arg("-f")
            .arg(output.path())
            .arg("-t")
            .arg(text)
            .with_timeout(Some(self.config.timeout));

        tracing::debug!(
            engine = %self.config.engine_bin,
            model = %assets.model_path.display(),
            text_len = text.len(),
            "Running synthesis engine"
        );

        let started = Instant::now();
        let result = self.runner.run(invocation).await?;

        if !result.success() {
            tracing::warn!(
                exit_code = ?result.exit_code,
                stderr = %result.stderr.trim_end(),
                "Synthesis engine failed"
            );
            return Err(ApplicationError::engine(format!(
                "{} failed: {}",
                self.config.engine_bin, result.stderr
            )));
        }

        let bytes = tokio::fs::read(output.path()).await.map_err(|e| {
            ApplicationError::engine(format!("engine produced no audio: {}", e))
        })?;
        if bytes.is_empty() {
            return Err(ApplicationError::engine("engine produced no audio: empty output"));
        }

        tracing::info!(
            audio_size = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Synthesis completed"
        );

        Ok(SynthesizedAudio {
            bytes,
            media_type: WAV_MEDIA_TYPE,
        })
    }
}
