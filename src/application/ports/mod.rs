//! Application Ports - 出站端口定义
//!
//! 定义应用层与外部引擎、文件系统、远程音色目录之间的抽象接口

mod process_runner;
mod recognition_engine;
mod voice_fetcher;
mod voice_store;

pub use process_runner::{
    format_timeout, ProcessError, ProcessInvocation, ProcessOutput, ProcessRunnerPort,
};
pub use recognition_engine::{Recognition, RecognitionEnginePort, RecognitionError, SegmentStream};
pub use voice_fetcher::{FetchError, VoiceFetcherPort};
pub use voice_store::{VoiceStoreError, VoiceStorePort};
