//! 应用层 - 命令
//!
//! 合成与转写请求

mod synthesis_commands;
mod transcription_commands;

pub mod handlers;

pub use synthesis_commands::*;
pub use transcription_commands::*;
