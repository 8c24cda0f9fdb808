//! HTTP Layer - RESTful API
//!
//! 合成服务（/tts, /health, /voices）与转写服务（/transcribe）

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::{stt_routes, tts_routes};
pub use server::{shutdown_signal, HttpServer, ServerConfig};
pub use state::{SttAppState, TtsAppState};
