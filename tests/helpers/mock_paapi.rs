use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    routing::post,
};
use paapi_relay::signing::{
    CredentialScope, build_canonical_request, build_string_to_sign, derive_signing_key,
    parse_authorization_header, sign,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// A request as seen by the mock upstream
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub signature_valid: bool,
}

#[derive(Clone)]
struct MockState {
    secret_key: String,
    response: Arc<Mutex<(u16, String)>>,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// Mock PA-API upstream that re-verifies SigV4 and serves a canned response
pub struct MockPaapi {
    pub base_url: String,
    response: Arc<Mutex<(u16, String)>>,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl MockPaapi {
    pub async fn start(secret_key: &str) -> Self {
        let response = Arc::new(Mutex::new((200, r#"{"ItemsResult":{"Items":[]}}"#.to_string())));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = MockState {
            secret_key: secret_key.to_string(),
            response: response.clone(),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/paapi5/getitems", post(handle))
            .route("/paapi5", post(handle))
            .with_state(state);

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

        MockPaapi {
            base_url: format!("http://{}", addr),
            response,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// Set the status and body returned for subsequent requests
    pub fn respond_with(&self, status: u16, body: impl Into<String>) {
        *self.response.lock().unwrap() = (status, body.into());
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockPaapi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header_map: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let signature_valid = verify(&state.secret_key, uri.path(), &header_map, &body);

    state.requests.lock().unwrap().push(ReceivedRequest {
        path: uri.path().to_string(),
        headers: header_map,
        body,
        signature_valid,
    });

    if !signature_valid {
        return (StatusCode::FORBIDDEN, "SignatureDoesNotMatch".to_string());
    }

    let (status, body) = state.response.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), body)
}

/// Recompute the signature from what actually arrived on the wire
fn verify(secret_key: &str, path: &str, headers: &BTreeMap<String, String>, body: &str) -> bool {
    let Some(info) = headers
        .get("authorization")
        .and_then(|h| parse_authorization_header(h).ok())
    else {
        return false;
    };
    let Some(amz_date) = headers.get("x-amz-date") else {
        return false;
    };

    let signed: BTreeMap<String, String> = info
        .signed_headers
        .iter()
        .filter_map(|name| headers.get(name).map(|v| (name.clone(), v.clone())))
        .collect();
    if signed.len() != info.signed_headers.len() {
        return false;
    }

    let scope_parts: Vec<&str> = info.credential_scope.split('/').collect();
    let scope = CredentialScope::new(scope_parts[0], scope_parts[1], scope_parts[2]);

    let Ok(canonical) = build_canonical_request("POST", path, "", &signed, body.as_bytes()) else {
        return false;
    };
    let string_to_sign = build_string_to_sign(amz_date, &scope, &canonical);
    let key = derive_signing_key(secret_key, &scope.date, &scope.region, &scope.service).unwrap();

    sign(&string_to_sign, &key).unwrap() == info.signature
}
