//! Synthesis HTTP Handler

use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::SynthesizeSpeech;
use crate::infrastructure::http::dto::TtsRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::TtsAppState;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}

/// 请求解析顺序：JSON 体 > 查询参数 > 纯文本体
fn parse_request(headers: &HeaderMap, query: TtsRequest, body: Bytes) -> Result<SynthesizeSpeech, ApiError> {
    if is_json(headers) {
        let json: TtsRequest = serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;
        return Ok(SynthesizeSpeech {
            text: json.text.unwrap_or_default(),
            voice: json.voice.or(query.voice),
        });
    }

    if let Some(text) = query.text.filter(|t| !t.is_empty()) {
        return Ok(SynthesizeSpeech {
            text,
            voice: query.voice,
        });
    }

    let text = String::from_utf8(body.to_vec())
        .map_err(|_| ApiError::BadRequest("Request body must be UTF-8 text".to_string()))?;
    Ok(SynthesizeSpeech {
        text,
        voice: query.voice,
    })
}

/// 文本转语音
pub async fn synthesize(
    State(state): State<Arc<TtsAppState>>,
    Query(query): Query<TtsRequest>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let command = parse_request(&headers, query, body)?;
    let response = state.synthesize_handler.handle(command).await?;

    let audio = response.audio;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, audio.media_type)
        .header(header::CONTENT_LENGTH, audio.bytes.len())
        .body(Body::from(audio.bytes))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
