//! Plagcheck HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use plagcheck::config::Config;
use plagcheck::embedding::{EmbeddingProvider, SentenceConfig, SentenceEmbedder};
use plagcheck::gateway::{HandlerState, create_router_with_state};
use plagcheck::rewrite::OpenRouterClient;
use plagcheck::search::{GitHubClient, TavilyClient};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        threshold = config.threshold,
        max_candidates = config.max_candidates,
        "Plagcheck starting"
    );

    let sentence_config = if let Some(path) = &config.model_path {
        SentenceConfig::new(path.clone())
    } else {
        tracing::warn!("No PLAGCHECK_MODEL_PATH configured, running embedder in stub mode");
        SentenceConfig::stub()
    };
    let embedder = tokio::task::spawn_blocking(move || SentenceEmbedder::load(sentence_config))
        .await??;
    tracing::info!(
        dim = embedder.embedding_dim(),
        stub = embedder.is_stub(),
        "Embedder loaded"
    );
    let provider: Arc<dyn EmbeddingProvider> = Arc::new(embedder);

    let github = GitHubClient::new(config.github_api_url.clone(), config.http_timeout)?;
    let tavily = TavilyClient::new(config.tavily_api_url.clone(), config.http_timeout)?;
    let openrouter = OpenRouterClient::new(
        config.openrouter_api_url.clone(),
        config.openrouter_model.clone(),
        config.http_timeout,
    )?;

    let state = HandlerState::new(
        config,
        provider,
        Arc::new(github),
        Arc::new(tavily),
        Arc::new(openrouter),
    )?;

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Plagcheck shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("PLAGCHECK_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(_) => return 1,
    };

    rt.block_on(async {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        {
            Ok(client) => client,
            Err(_) => return 1,
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
