//! Transcription Command Handlers

use std::sync::Arc;

use crate::application::commands::TranscribeAudio;
use crate::application::error::ApplicationError;
use crate::application::services::TranscriptionOrchestrator;
use crate::domain::transcript::{LanguageHint, TranscriptResult};

/// TranscribeAudio Handler
pub struct TranscribeAudioHandler {
    orchestrator: Arc<TranscriptionOrchestrator>,
}

impl TranscribeAudioHandler {
    pub fn new(orchestrator: Arc<TranscriptionOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn handle(&self, command: TranscribeAudio) -> Result<TranscriptResult, ApplicationError> {
        if command.audio.is_empty() {
            return Err(ApplicationError::validation("Audio file is empty"));
        }

        let language = LanguageHint::parse(command.source_lang.as_deref());
        self.orchestrator
            .transcribe(&command.audio, command.filename.as_deref(), &language)
            .await
    }
}
