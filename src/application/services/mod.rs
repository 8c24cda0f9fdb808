//! Application Services - 合成与转写的核心编排

mod synthesis_orchestrator;
mod transcription_orchestrator;
mod voice_resolver;

pub use synthesis_orchestrator::{
    SynthesisOrchestrator, SynthesisOrchestratorConfig, SynthesizedAudio, WAV_MEDIA_TYPE,
};
pub use transcription_orchestrator::{upload_suffix, TranscriptionOrchestrator};
pub use voice_resolver::VoiceResolver;
