//! Transcript Context - Value Objects

/// 源语言提示
///
/// 缺省、空字符串或 `auto` 均表示自动检测
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageHint {
    #[default]
    Auto,
    Code(String),
}

impl LanguageHint {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Auto,
            Some(code) if code.eq_ignore_ascii_case("auto") => Self::Auto,
            Some(code) => Self::Code(code.to_string()),
        }
    }

    /// 需要显式传给识别引擎的语言代码
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Auto => None,
            Self::Code(code) => Some(code.as_str()),
        }
    }
}

/// 识别引擎输出的一个片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// 整段音频的语言检测结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLanguage {
    pub language: String,
}

/// 转写结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptResult {
    pub text: String,
    pub language: String,
}

/// 按顺序无分隔拼接全部片段，再去掉首尾空白
pub fn join_segments<I>(segments: I) -> String
where
    I: IntoIterator<Item = TranscriptSegment>,
{
    let mut text = String::new();
    for segment in segments {
        text.push_str(&segment.text);
    }
    text.trim().to_string()
}
