//! Health / Voices Handlers
//!
//! 只读，不创建目录也不触发下载

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetHealth, ListInstalledVoices};
use crate::infrastructure::http::dto::{HealthResponse, VoicesResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::TtsAppState;

/// 健康检查：默认音色 + 已安装音色
pub async fn health(State(state): State<Arc<TtsAppState>>) -> Result<Json<HealthResponse>, ApiError> {
    let health = state.health_handler.handle(GetHealth).await?;
    Ok(Json(HealthResponse {
        ok: true,
        installed: health.installed,
        default: health.default_voice,
    }))
}

/// 列出已安装音色
pub async fn list_voices(
    State(state): State<Arc<TtsAppState>>,
) -> Result<Json<VoicesResponse>, ApiError> {
    let installed = state.list_voices_handler.handle(ListInstalledVoices).await?;
    Ok(Json(VoicesResponse { installed }))
}
