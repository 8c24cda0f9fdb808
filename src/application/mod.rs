//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（进程调用、音色库、音色下载、识别引擎）
//! - services: 音色解析、合成编排、转写编排
//! - commands: 命令及处理器（合成、转写）
//! - queries: 查询及处理器（已安装音色、健康检查）
//! - scratch: 单次请求的临时文件
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod scratch;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use commands::{
    // Commands
    SynthesizeSpeech,
    TranscribeAudio,
    // Handlers
    handlers::{SynthesizeSpeechHandler, SynthesizeSpeechResponse, TranscribeAudioHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Process runner
    ProcessError,
    ProcessInvocation,
    ProcessOutput,
    ProcessRunnerPort,
    // Recognition engine
    Recognition,
    RecognitionEnginePort,
    RecognitionError,
    SegmentStream,
    // Voice fetcher
    FetchError,
    VoiceFetcherPort,
    // Voice store
    VoiceStoreError,
    VoiceStorePort,
};

pub use queries::{
    GetHealth,
    ListInstalledVoices,
    // Handlers
    handlers::{GetHealthHandler, HealthResponse, ListInstalledVoicesHandler},
};

pub use scratch::ScratchFile;

pub use services::{
    SynthesisOrchestrator, SynthesisOrchestratorConfig, SynthesizedAudio, TranscriptionOrchestrator,
    VoiceResolver,
};
