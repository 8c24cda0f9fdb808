//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色标识与本地音色资产
//! - Transcript Context: 识别片段与转写结果

pub mod transcript;
pub mod voice;
