//! HTTP Routes
//!
//! 合成服务:
//! - /tts       POST  文本转语音，返回 audio/wav
//! - /health    GET   默认音色 + 已安装音色
//! - /voices    GET   已安装音色
//!
//! 转写服务:
//! - /transcribe POST multipart 音频转文字

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::{SttAppState, TtsAppState};

/// 合成服务路由
pub fn tts_routes(state: Arc<TtsAppState>) -> Router {
    Router::new()
        .route("/tts", post(handlers::synthesize))
        .route("/health", get(handlers::health))
        .route("/voices", get(handlers::list_voices))
        .with_state(state)
}

/// 转写服务路由
pub fn stt_routes(state: Arc<SttAppState>) -> Router {
    Router::new()
        .route("/transcribe", post(handlers::transcribe))
        .with_state(state)
}
