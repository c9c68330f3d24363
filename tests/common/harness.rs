//! Test server harness.

use plagcheck::config::Config;
use plagcheck::embedding::SentenceEmbedder;
use plagcheck::gateway::{HandlerState, create_router_with_state};
use plagcheck::rewrite::MockChatCompletion;
use plagcheck::search::{MockArticleSearch, MockCodeSearch};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

/// Canned upstream data for a test server.
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    pub threshold: f64,
    /// `(html_url, contents)`; `None` contents make the raw download fail.
    pub code_files: Vec<(String, Option<String>)>,
    pub code_search_failure: Option<(u16, String)>,
    pub articles: Vec<(Option<String>, Option<String>, String)>,
    pub chat_reply: String,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            threshold: 50.0,
            code_files: Vec::new(),
            code_search_failure: None,
            articles: Vec::new(),
            chat_reply: "unused".to_string(),
        }
    }
}

impl TestServerConfig {
    pub fn with_code_file(mut self, html_url: &str, contents: &str) -> Self {
        self.code_files
            .push((html_url.to_string(), Some(contents.to_string())));
        self
    }

    pub fn with_broken_code_file(mut self, html_url: &str) -> Self {
        self.code_files.push((html_url.to_string(), None));
        self
    }

    pub fn with_article(mut self, title: Option<&str>, url: Option<&str>, content: &str) -> Self {
        self.articles.push((
            title.map(str::to_string),
            url.map(str::to_string),
            content.to_string(),
        ));
        self
    }

    pub fn with_chat_reply(mut self, reply: &str) -> Self {
        self.chat_reply = reply.to_string();
        self
    }

    fn code_search(&self) -> MockCodeSearch {
        let mut search = MockCodeSearch::new();
        for (url, contents) in &self.code_files {
            search = match contents {
                Some(contents) => search.with_file(url, contents),
                None => search.with_broken_file(url),
            };
        }
        if let Some((status, body)) = &self.code_search_failure {
            search = search.failing(*status, body);
        }
        search
    }

    fn article_search(&self) -> MockArticleSearch {
        self.articles
            .iter()
            .fold(MockArticleSearch::new(), |search, (title, url, content)| {
                search.with_result(title.as_deref(), url.as_deref(), content)
            })
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server with the stub embedder and mocked GitHub, Tavily and OpenRouter.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let server_config = Config {
        port: local_addr.port(),
        threshold: config.threshold,
        ..Default::default()
    };
    server_config
        .validate()
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let state = HandlerState::new(
        server_config,
        Arc::new(SentenceEmbedder::stub()),
        Arc::new(config.code_search()),
        Arc::new(config.article_search()),
        Arc::new(MockChatCompletion::replying(&config.chat_reply)),
    )
    .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
