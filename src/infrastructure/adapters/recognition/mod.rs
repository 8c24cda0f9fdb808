//! Recognition Adapter - faster-whisper 命令行实现

mod whisper_cli_engine;

pub use whisper_cli_engine::{WhisperCliConfig, WhisperCliEngine};
