//! voicegate-stt - 语音转文字服务
//!
//! POST /transcribe（multipart: audio + sourceLang）

use std::sync::Arc;

use voicegate::application::TranscriptionOrchestrator;
use voicegate::config::{load_config, print_config, Service};
use voicegate::infrastructure::adapters::{TokioProcessRunner, WhisperCliConfig, WhisperCliEngine};
use voicegate::infrastructure::http::{
    shutdown_signal, stt_routes, HttpServer, ServerConfig, SttAppState,
};
use voicegate::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config(Service::Stt)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config.log);

    tracing::info!("voicegate-stt {}", env!("CARGO_PKG_VERSION"));
    print_config(&config, Service::Stt);

    tokio::fs::create_dir_all(&config.storage.scratch_dir).await?;

    // 识别引擎在进程内只创建一次，所有请求共用
    let engine = Arc::new(WhisperCliEngine::new(
        WhisperCliConfig {
            engine_bin: config.stt.engine_bin.clone(),
            model: config.stt.model.clone(),
            device: config.stt.device.clone(),
            compute_type: config.stt.compute_type.clone(),
            timeout_secs: config.stt.engine_timeout_secs,
        },
        Arc::new(TokioProcessRunner::new()),
    ));
    let orchestrator = Arc::new(TranscriptionOrchestrator::new(
        engine,
        config.storage.scratch_dir.clone(),
    ));

    let server_config = ServerConfig::new(&config.stt.host, config.stt.port)
        .with_max_body_size(config.storage.max_upload_size as usize);
    let server = HttpServer::new(server_config, stt_routes(Arc::new(SttAppState::new(orchestrator))));

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
