//! Verbvox - 不规则动词词典与朗读服务
//!
//! 用法: verbvox [config.toml]

use std::path::PathBuf;
use std::sync::Arc;

use verbvox::application::{
    shared_preferences, shared_workspace, DictionaryServicePort, RefreshVerbs, ReloadVoices,
    VoiceSpeaker,
};
use verbvox::config::{load_config_from_path, print_config, AppConfig};
use verbvox::infrastructure::adapters::{
    EspeakConfig, EspeakEngine, ODataClientConfig, ODataDictionaryClient, TokioClock,
};
use verbvox::infrastructure::http::{AppState, HttpServer, ServerConfig};
use verbvox::infrastructure::memory::InMemoryDictionaryService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config_from_path(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Verbvox - irregular verb dictionary");
    print_config(&config);

    // espeak-ng 同时充当音色注册表和朗读引擎
    let espeak = Arc::new(EspeakEngine::new(EspeakConfig {
        binary: config.speech.espeak_bin.clone(),
        ..Default::default()
    }));
    let speaker = Arc::new(VoiceSpeaker::new(
        config.speech.speaker_config(),
        espeak.clone(),
        espeak,
        Arc::new(TokioClock),
    ));

    let dictionary_service: Arc<dyn DictionaryServicePort> = match &config.dictionary.service_url {
        Some(url) => Arc::new(ODataDictionaryClient::new(
            ODataClientConfig::new(url.clone())
                .with_entity_set(config.dictionary.entity_set.clone())
                .with_timeout(config.dictionary.timeout_secs),
        )?),
        None => InMemoryDictionaryService::new().arc(),
    };

    let state = Arc::new(AppState::new(
        speaker,
        dictionary_service,
        shared_preferences(config.speech.initial_preferences()),
        shared_workspace(),
        config.dictionary.update_group.clone(),
    ));

    // 启动时预加载，失败不影响服务启动
    if let Err(e) = state
        .reload_voices_handler
        .handle(ReloadVoices {
            language: config.speech.language.clone(),
        })
        .await
    {
        tracing::warn!(error = %e, "Initial voice load failed");
    }
    if let Err(e) = state.refresh_verbs_handler.handle(RefreshVerbs).await {
        tracing::warn!(error = %e, "Initial verb load failed");
    }

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志；RUST_LOG 优先于配置文件中的级别
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},verbvox={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
