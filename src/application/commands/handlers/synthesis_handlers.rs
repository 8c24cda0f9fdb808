//! Synthesis Command Handlers

use std::sync::Arc;

use crate::application::commands::SynthesizeSpeech;
use crate::application::error::ApplicationError;
use crate::application::services::{SynthesisOrchestrator, SynthesizedAudio, VoiceResolver};
use crate::domain::voice::VoiceId;

/// 合成响应
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    pub voice: VoiceId,
    pub audio: SynthesizedAudio,
}

/// SynthesizeSpeech Handler
///
/// 校验输入 -> 解析音色 -> 调用合成引擎
pub struct SynthesizeSpeechHandler {
    resolver: Arc<VoiceResolver>,
    orchestrator: Arc<SynthesisOrchestrator>,
    default_voice: String,
}

impl SynthesizeSpeechHandler {
    pub fn new(
        resolver: Arc<VoiceResolver>,
        orchestrator: Arc<SynthesisOrchestrator>,
        default_voice: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            orchestrator,
            default_voice: default_voice.into(),
        }
    }

    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    pub async fn handle(
        &self,
        command: SynthesizeSpeech,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        // 空文本在分配任何资源之前拒绝
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text is required"));
        }

        let voice = self.select_voice(command.voice.as_deref())?;
        let assets = self.resolver.resolve(&voice).await?;
        let audio = self.orchestrator.synthesize(&command.text, &assets).await?;

        tracing::info!(
            voice = %voice,
            text_len = command.text.len(),
            audio_size = audio.bytes.len(),
            "Speech synthesized"
        );

        Ok(SynthesizeSpeechResponse { voice, audio })
    }

    fn select_voice(&self, requested: Option<&str>) -> Result<VoiceId, ApplicationError> {
        match requested.map(str::trim).filter(|v| !v.is_empty()) {
            Some(voice) => Ok(VoiceId::new(voice)?),
            None => {
                if self.default_voice.trim().is_empty() {
                    return Err(ApplicationError::configuration("Default voice is not configured"));
                }
                VoiceId::new(self.default_voice.as_str()).map_err(|e| {
                    ApplicationError::configuration(format!("Invalid default voice: {}", e))
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::SynthesisOrchestratorConfig;
    use crate::application::test_support::{
        install_voice, CountingFetcher, FetchBehavior, ScriptedRunner,
    };
    use crate::domain::voice::VoiceFileLayout;
    use crate::infrastructure::adapters::FileVoiceStore;
    use std::time::Duration;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        voices: TempDir,
        _scratch: TempDir,
        fetcher: Arc<CountingFetcher>,
        runner: Arc<ScriptedRunner>,
        handler: SynthesizeSpeechHandler,
    }

    fn fixture(default_voice: &str, runner: ScriptedRunner) -> Fixture {
        let voices = tempdir().unwrap();
        let scratch = tempdir().unwrap();
        let fetcher = Arc::new(CountingFetcher::new(FetchBehavior::Unknown));
        let runner = Arc::new(runner);

        let store = Arc::new(FileVoiceStore::new(voices.path(), VoiceFileLayout::default()));
        let resolver = Arc::new(VoiceResolver::new(store, fetcher.clone()));
        let orchestrator = Arc::new(SynthesisOrchestrator::new(
            SynthesisOrchestratorConfig {
                engine_bin: "piper".to_string(),
                timeout: Duration::from_secs(5),
                scratch_dir: scratch.path().to_path_buf(),
            },
            runner.clone(),
        ));

        Fixture {
            handler: SynthesizeSpeechHandler::new(resolver, orchestrator, default_voice),
            voices,
            _scratch: scratch,
            fetcher,
            runner,
        }
    }

    #[tokio::test]
    async fn test_blank_text_rejected_before_any_work() {
        let f = fixture("en_US-lessac-medium", ScriptedRunner::writing_audio(b"wav"));

        for text in ["", "   \n"] {
            let err = f
                .handler
                .handle(SynthesizeSpeech {
                    text: text.to_string(),
                    voice: None,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ApplicationError::ValidationError(_)));
        }
        assert_eq!(f.fetcher.calls(), 0);
        assert_eq!(f.runner.calls(), 0);
        // 音色库目录也未被触碰
        assert_eq!(std::fs::read_dir(f.voices.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_uses_default_voice() {
        let f = fixture("en_US-lessac-medium", ScriptedRunner::writing_audio(b"wav"));
        install_voice(f.voices.path(), "en_US-lessac-medium");

        let response = f
            .handler
            .handle(SynthesizeSpeech {
                text: "Hello world".to_string(),
                voice: None,
            })
            .await
            .unwrap();
        assert_eq!(response.voice.as_str(), "en_US-lessac-medium");
        assert_eq!(response.audio.bytes, b"wav");
    }

    #[tokio::test]
    async fn test_voice_override() {
        let f = fixture("en_US-lessac-medium", ScriptedRunner::writing_audio(b"wav"));
        install_voice(f.voices.path(), "de_DE-thorsten-high");

        let response = f
            .handler
            .handle(SynthesizeSpeech {
                text: "Hallo Welt".to_string(),
                voice: Some("de_DE-thorsten-high".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(response.voice.as_str(), "de_DE-thorsten-high");
        let args = f.runner.invocations()[0].args_lossy();
        assert!(args[1].ends_with("de_DE-thorsten-high.onnx"));
    }

    #[tokio::test]
    async fn test_blank_override_falls_back_to_default() {
        let f = fixture("en_US-lessac-medium", ScriptedRunner::writing_audio(b"wav"));
        install_voice(f.voices.path(), "en_US-lessac-medium");

        let response = f
            .handler
            .handle(SynthesizeSpeech {
                text: "Hi".to_string(),
                voice: Some("  ".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(response.voice.as_str(), "en_US-lessac-medium");
    }

    #[tokio::test]
    async fn test_missing_default_voice_is_configuration_error() {
        let f = fixture("", ScriptedRunner::writing_audio(b"wav"));

        let err = f
            .handler
            .handle(SynthesizeSpeech {
                text: "Hi".to_string(),
                voice: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ConfigurationError(_)));
        assert_eq!(f.runner.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_voice_override_is_validation_error() {
        let f = fixture("en_US-lessac-medium", ScriptedRunner::writing_audio(b"wav"));

        let err = f
            .handler
            .handle(SynthesizeSpeech {
                text: "Hi".to_string(),
                voice: Some("../../etc/passwd".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(f.fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_unresolvable_voice_skips_engine() {
        let f = fixture("en_US-lessac-medium", ScriptedRunner::writing_audio(b"wav"));

        let err = f
            .handler
            .handle(SynthesizeSpeech {
                text: "Hi".to_string(),
                voice: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::VoiceUnavailable { .. }));
        assert_eq!(f.fetcher.calls(), 1);
        assert_eq!(f.runner.calls(), 0);
    }
}
