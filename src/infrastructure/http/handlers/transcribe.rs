//! Transcription HTTP Handler

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::TranscribeAudio;
use crate::infrastructure::http::dto::TranscribeResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::SttAppState;

/// 语音转文字
///
/// multipart 字段：`audio`（或 `file`）为音频，`sourceLang` 为可选源语言
pub async fn transcribe(
    State(state): State<Arc<SttAppState>>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let mut audio: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut source_lang: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "audio" | "file" => {
                filename = field.file_name().map(|s| s.to_string());
                audio = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read audio: {}", e)))?
                        .to_vec(),
                );
            }
            "sourceLang" => {
                source_lang = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read sourceLang: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let audio = audio.ok_or_else(|| ApiError::BadRequest("Audio file is required".to_string()))?;

    let result = state
        .transcribe_handler
        .handle(TranscribeAudio {
            audio,
            filename,
            source_lang,
        })
        .await?;

    Ok(Json(TranscribeResponse {
        text: result.text,
        language: result.language,
    }))
}
