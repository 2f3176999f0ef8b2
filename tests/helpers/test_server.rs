use super::MockPaapi;
use paapi_relay::{ApiVariant, AppState, Credentials, PaapiClient, create_app};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Relay server on a random port, wired to a mock upstream
///
/// Uses the production router from create_app() and shuts down on drop.
pub struct TestServer {
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: JoinHandle<()>,
    pub base_url: String,
    pub http: reqwest::Client,
}

impl TestServer {
    pub async fn start(
        upstream: &MockPaapi,
        variant: ApiVariant,
        credentials: Option<Credentials>,
    ) -> Self {
        let client = PaapiClient::new(variant, Duration::from_secs(5))
            .unwrap()
            .with_endpoint_override(upstream.base_url.clone());

        let app = create_app(AppState::new(client, credentials));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        TestServer {
            shutdown_tx: Some(shutdown_tx),
            handle,
            base_url: format!("http://{}", addr),
            http: reqwest::Client::new(),
        }
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
