//! Synthesis Commands

/// 合成语音命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub text: String,
    /// 未指定时使用默认音色
    pub voice: Option<String>,
}
