//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// Synthesis DTOs
// ============================================================================

/// `POST /tts` 的 JSON 请求体，也用于查询参数
#[derive(Debug, Default, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub installed: Vec<String>,
    pub default: String,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub installed: Vec<String>,
}

// ============================================================================
// Transcription DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
    pub language: String,
}
