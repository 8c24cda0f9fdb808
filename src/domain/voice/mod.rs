//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色标识校验
//! - 本地音色资产（模型 + 配置）的命名规则

mod errors;
mod value_objects;

pub use errors::VoiceError;
pub use value_objects::{VoiceAssetPair, VoiceFileLayout, VoiceId};
