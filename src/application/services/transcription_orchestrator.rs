//! Transcription Orchestrator - 调用外部识别引擎
//!
//! 上传内容完整写入临时文件（保留原扩展名，引擎依赖容器格式），
//! 调用识别引擎，按顺序拼接全部片段。临时文件在所有退出路径上删除。

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::application::error::ApplicationError;
use crate::application::ports::RecognitionEnginePort;
use crate::application::scratch::ScratchFile;
use crate::domain::transcript::{join_segments, LanguageHint, TranscriptResult};

/// 扩展名最大长度
const MAX_EXTENSION_LEN: usize = 8;

pub struct TranscriptionOrchestrator {
    engine: Arc<dyn RecognitionEnginePort>,
    scratch_dir: PathBuf,
}

impl TranscriptionOrchestrator {
    pub fn new(engine: Arc<dyn RecognitionEnginePort>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            scratch_dir: scratch_dir.into(),
        }
    }

    pub async fn transcribe(
        &self,
        audio: &[u8],
        filename_hint: Option<&str>,
        language: &LanguageHint,
    ) -> Result<TranscriptResult, ApplicationError> {
        let suffix = upload_suffix(filename_hint);
        let input = ScratchFile::create(&self.scratch_dir, &suffix, audio)
            .await
            .map_err(|e| ApplicationError::storage(format!("Failed to stage upload: {}", e)))?;

        tracing::debug!(
            path = %input.path().display(),
            audio_size = audio.len(),
            language = ?language.code(),
            "Running recognition engine"
        );

        let started = Instant::now();
        let recognition = self.engine.recognize(input.path(), language).await?;
        let text = join_segments(recognition.segments);

        tracing::info!(
            language = %recognition.info.language,
            text_len = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Transcription completed"
        );

        Ok(TranscriptResult {
            text,
            language: recognition.info.language,
        })
    }
}

/// 由上传文件名得到临时文件后缀（`.mp3` 等）
///
/// 只保留 ASCII 字母数字扩展名，其他情况不加后缀
pub fn upload_suffix(filename: Option<&str>) -> String {
    filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{list_files, ScriptedEngine};
    use tempfile::tempdir;

    #[test]
    fn test_upload_suffix() {
        assert_eq!(upload_suffix(Some("clip.MP3")), ".mp3");
        assert_eq!(upload_suffix(Some("a.b.flac")), ".flac");
        assert_eq!(upload_suffix(Some("noext")), "");
        assert_eq!(upload_suffix(None), "");
        assert_eq!(upload_suffix(Some("evil.w/av")), "");
        assert_eq!(upload_suffix(Some("x.verylongextension")), "");
    }

    #[tokio::test]
    async fn test_concatenates_segments_and_trims() {
        let scratch = tempdir().unwrap();
        let engine = Arc::new(ScriptedEngine::new(vec!["Hello ", "world."], "en"));
        let orchestrator = TranscriptionOrchestrator::new(engine.clone(), scratch.path());

        let result = orchestrator
            .transcribe(b"ID3audio", Some("clip.mp3"), &LanguageHint::Auto)
            .await
            .unwrap();

        assert_eq!(
            result,
            TranscriptResult {
                text: "Hello world.".to_string(),
                language: "en".to_string(),
            }
        );
        assert!(list_files(scratch.path()).is_empty());
    }

    #[tokio::test]
    async fn test_engine_reads_staged_file_with_extension() {
        let scratch = tempdir().unwrap();
        let engine = Arc::new(ScriptedEngine::new(vec![" Hallo"], "de"));
        let orchestrator = TranscriptionOrchestrator::new(engine.clone(), scratch.path());

        orchestrator
            .transcribe(b"fLaC-bytes", Some("memo.flac"), &LanguageHint::Code("de".into()))
            .await
            .unwrap();

        let observed = engine.observed();
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].contents, b"fLaC-bytes");
        assert!(observed[0].path.to_string_lossy().ends_with(".flac"));
        assert!(observed[0].path.starts_with(scratch.path()));
        assert_eq!(observed[0].language, LanguageHint::Code("de".into()));
        assert!(!observed[0].path.exists());
    }

    #[tokio::test]
    async fn test_engine_failure_removes_scratch() {
        let scratch = tempdir().unwrap();
        let engine = Arc::new(ScriptedEngine::failing("CUDA out of memory"));
        let orchestrator = TranscriptionOrchestrator::new(engine, scratch.path());

        let err = orchestrator
            .transcribe(b"RIFF", Some("a.wav"), &LanguageHint::Auto)
            .await
            .unwrap_err();
        match err {
            ApplicationError::EngineFailure(msg) => assert!(msg.contains("CUDA out of memory")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(list_files(scratch.path()).is_empty());
    }

    #[tokio::test]
    async fn test_missing_scratch_dir_is_storage_error() {
        let scratch = tempdir().unwrap();
        let engine = Arc::new(ScriptedEngine::new(vec![], "en"));
        let orchestrator =
            TranscriptionOrchestrator::new(engine.clone(), scratch.path().join("missing"));

        let err = orchestrator
            .transcribe(b"RIFF", Some("a.wav"), &LanguageHint::Auto)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::StorageError(_)));
        assert!(engine.observed().is_empty());
    }
}
