//! Transcript Context - 语音识别结果

mod value_objects;

pub use value_objects::{join_segments, DetectedLanguage, LanguageHint, TranscriptResult, TranscriptSegment};
