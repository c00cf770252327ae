//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `hrqa-server`
//! integration tests. `TestApp` spawns a real server on a random port, backed by
//! an in-memory document store, a fixed tokenizer and an `httpmock::MockServer`
//! standing in for every generative backend.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use hrqa_server::{
    config, router,
    state::{build_app_state_with, AppState},
};
use hrqa_test_utils::{FixedTokenizer, InMemoryDocumentStore};
use httpmock::MockServer;
use reqwest::Client;
use std::{fs, net::SocketAddr, sync::Arc};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// A configuration with one OpenAI-compatible provider, "deepseek", serving
/// both answers and web search from the mock server.
pub fn config_with_backend(mock_server: &MockServer) -> String {
    format!(
        r#"
port: 0
store:
  url: "{base}"
embedding:
  api_url: "{base}/v1/embeddings"
  model_name: "mock-embedding-model"
providers:
  deepseek:
    provider: "local"
    api_url: "{base}/chat/completions"
    api_key: "test-key"
    model_name: "deepseek-chat"
answer:
  providers: ["deepseek"]
web_search:
  provider: "deepseek"
"#,
        base = mock_server.base_url()
    )
}

/// A configuration whose only provider has no key, so nothing is enabled.
pub fn config_without_backend(mock_server: &MockServer) -> String {
    format!(
        r#"
port: 0
store:
  url: "{base}"
embedding:
  api_url: "{base}/v1/embeddings"
  model_name: "mock-embedding-model"
providers:
  deepseek:
    provider: "local"
    api_url: "{base}/chat/completions"
    api_key: ""
    model_name: "deepseek-chat"
answer:
  providers: ["deepseek"]
web_search:
  provider: "deepseek"
"#,
        base = mock_server.base_url()
    )
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub store: InMemoryDocumentStore,
    pub app_state: AppState,
    _config_dir: Option<TempDir>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with a working generative backend.
    pub async fn spawn(store: InMemoryDocumentStore, tokenizer: FixedTokenizer) -> Result<Self> {
        Self::spawn_with_config(store, tokenizer, config_with_backend).await
    }

    /// Spawns the server with a configuration rendered against the mock server.
    pub async fn spawn_with_config(
        store: InMemoryDocumentStore,
        tokenizer: FixedTokenizer,
        render_config: impl FnOnce(&MockServer) -> String,
    ) -> Result<Self> {
        let mock_server = MockServer::start();

        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        fs::write(&config_path, render_config(&mock_server))?;

        let config = config::get_config(config_path.to_str())?;
        let app_state = build_app_state_with(config, Arc::new(store.clone()), Arc::new(tokenizer))?;

        let mut app = TestApp::spawn_with_state(app_state, store, mock_server).await?;
        app._config_dir = Some(config_dir);
        Ok(app)
    }

    pub async fn spawn_with_state(
        app_state: AppState,
        store: InMemoryDocumentStore,
        mock_server: MockServer,
    ) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            store,
            app_state: app_state_for_harness,
            _config_dir: None,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
