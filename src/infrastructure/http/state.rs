//! Application State
//!
//! 两个服务各自的 Command/Query Handlers

use std::sync::Arc;

use crate::application::{
    GetHealthHandler, ListInstalledVoicesHandler, SynthesisOrchestrator, SynthesizeSpeechHandler,
    TranscribeAudioHandler, TranscriptionOrchestrator, VoiceResolver, VoiceStorePort,
};

/// 合成服务状态
pub struct TtsAppState {
    pub synthesize_handler: SynthesizeSpeechHandler,
    pub list_voices_handler: ListInstalledVoicesHandler,
    pub health_handler: GetHealthHandler,
}

impl TtsAppState {
    pub fn new(
        store: Arc<dyn VoiceStorePort>,
        resolver: Arc<VoiceResolver>,
        orchestrator: Arc<SynthesisOrchestrator>,
        default_voice: impl Into<String>,
    ) -> Self {
        let default_voice = default_voice.into();
        Self {
            synthesize_handler: SynthesizeSpeechHandler::new(
                resolver,
                orchestrator,
                default_voice.clone(),
            ),
            list_voices_handler: ListInstalledVoicesHandler::new(store.clone()),
            health_handler: GetHealthHandler::new(store, default_voice),
        }
    }
}

/// 转写服务状态
pub struct SttAppState {
    pub transcribe_handler: TranscribeAudioHandler,
}

impl SttAppState {
    pub fn new(orchestrator: Arc<TranscriptionOrchestrator>) -> Self {
        Self {
            transcribe_handler: TranscribeAudioHandler::new(orchestrator),
        }
    }
}
