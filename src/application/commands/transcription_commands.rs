//! Transcription Commands

/// 转写音频命令
#[derive(Debug, Clone)]
pub struct TranscribeAudio {
    pub audio: Vec<u8>,
    /// 上传时的原始文件名（用于保留扩展名）
    pub filename: Option<String>,
    /// 源语言，缺省或 `auto` 表示自动检测
    pub source_lang: Option<String>,
}
