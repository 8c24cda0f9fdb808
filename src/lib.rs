//! Voicegate - 本地语音合成与语音识别网关
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色标识与文件布局
//! - Transcript Context: 语言提示与转写结果
//!
//! 应用层 (application/):
//! - Ports: 进程调用、音色库、音色下载、识别引擎
//! - Services: 音色解析、合成编排、转写编排
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 两个服务的 REST 端点
//! - Adapters: 子进程、文件音色库、HTTP 音色下载、Whisper 命令行

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::{load_config, AppConfig};
