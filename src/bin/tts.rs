//! voicegate-tts - 文本转语音服务
//!
//! POST /tts, GET /health, GET /voices
//! 缺失的音色按需从远程仓库下载

use std::sync::Arc;

use voicegate::application::{SynthesisOrchestrator, SynthesisOrchestratorConfig, VoiceResolver};
use voicegate::config::{load_config, print_config, Service};
use voicegate::infrastructure::adapters::{
    FileVoiceStore, HttpVoiceFetcher, HttpVoiceFetcherConfig, TokioProcessRunner,
};
use voicegate::infrastructure::http::{
    shutdown_signal, tts_routes, HttpServer, ServerConfig, TtsAppState,
};
use voicegate::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config(Service::Tts)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config.log);

    tracing::info!("voicegate-tts {}", env!("CARGO_PKG_VERSION"));
    print_config(&config, Service::Tts);

    // 确保目录存在
    tokio::fs::create_dir_all(&config.tts.voices_dir).await?;
    tokio::fs::create_dir_all(&config.storage.scratch_dir).await?;

    let layout = config.tts.layout();

    // 本地音色库 + 远程下载
    let store = Arc::new(FileVoiceStore::new(&config.tts.voices_dir, layout.clone()));
    let fetcher = Arc::new(
        HttpVoiceFetcher::new(HttpVoiceFetcherConfig {
            base_url: config.voices.base_url.clone(),
            timeout_secs: config.voices.download_timeout_secs,
            layout,
        })
        .map_err(|e| anyhow::anyhow!("Failed to create voice fetcher: {}", e))?,
    );
    let resolver = Arc::new(VoiceResolver::new(store.clone(), fetcher));

    // 合成引擎
    let orchestrator = Arc::new(SynthesisOrchestrator::new(
        SynthesisOrchestratorConfig {
            engine_bin: config.tts.engine_bin.clone(),
            timeout: config.tts.engine_timeout(),
            scratch_dir: config.storage.scratch_dir.clone(),
        },
        Arc::new(TokioProcessRunner::new()),
    ));

    let state = TtsAppState::new(
        store,
        resolver,
        orchestrator,
        config.tts.default_voice.clone(),
    );

    let server_config = ServerConfig::new(&config.tts.host, config.tts.port)
        .with_max_body_size(config.storage.max_upload_size as usize);
    let server = HttpServer::new(server_config, tts_routes(Arc::new(state)));

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
