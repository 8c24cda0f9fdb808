//! Recognition Engine Port - 语音识别引擎抽象

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::process_runner::format_timeout;
use crate::domain::transcript::{DetectedLanguage, LanguageHint, TranscriptSegment};

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("Recognition engine failed: {0}")]
    EngineFailed(String),

    #[error("Recognition timed out after {}", format_timeout(*.0))]
    Timeout(Duration),

    #[error("Invalid engine output: {0}")]
    InvalidOutput(String),
}

/// 片段序列：有限、只能遍历一次
pub type SegmentStream = Box<dyn Iterator<Item = TranscriptSegment> + Send>;

/// 一次识别的结果：整段的语言检测 + 片段序列
pub struct Recognition {
    pub info: DetectedLanguage,
    pub segments: SegmentStream,
}

impl std::fmt::Debug for Recognition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recognition")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait RecognitionEnginePort: Send + Sync {
    /// 识别存储上的音频文件；`LanguageHint::Auto` 时不指定语言
    async fn recognize(
        &self,
        audio_path: &Path,
        language: &LanguageHint,
    ) -> Result<Recognition, RecognitionError>;
}
