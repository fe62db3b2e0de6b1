//! In-process stand-in for the remote API, used by the unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::client::Client;
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

type Responder = dyn Fn(&Recorded) -> (u16, String) + Send + Sync;

struct MockState {
    requests: Mutex<Vec<Recorded>>,
    responder: Box<Responder>,
}

pub struct MockServer {
    pub url: String,
    state: Arc<MockState>,
}

impl MockServer {
    /// Serve every request through `responder` on a random local port.
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        init_tracing();

        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        });
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    /// Answer every request with the same status and body.
    pub async fn fixed(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| (status, body.clone())).await
    }

    /// An in-memory REST collection rooted at `prefix` (e.g. `/1/boards`).
    pub async fn collection(prefix: &str) -> Self {
        Self::start(fake_collection(prefix)).await
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn client(&self) -> Client {
        Client::new(Config::new("test-key").with_api_url(&self.url)).expect("test client")
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let req = Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    };
    let (status, body) = (state.responder)(&req);
    state.requests.lock().expect("requests lock").push(req);
    (StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), body)
}

/// Create assigns an `id`, update replaces, unknown ids answer 404.
fn fake_collection(prefix: &str) -> impl Fn(&Recorded) -> (u16, String) + Send + Sync + 'static {
    let prefix = prefix.trim_end_matches('/').to_string();
    let items: Mutex<BTreeMap<String, Value>> = Mutex::new(BTreeMap::new());
    let next_id = AtomicU64::new(1);

    move |req: &Recorded| {
        let Some(rest) = req.path.strip_prefix(&prefix) else {
            return (404, r#"{"error":"unknown collection"}"#.to_string());
        };
        let id = rest.trim_start_matches('/');
        let mut items = items.lock().expect("collection lock");

        match (req.method.as_str(), id.is_empty()) {
            ("GET", true) => (200, Value::Array(items.values().cloned().collect()).to_string()),
            ("POST", true) => {
                let mut item = req.json();
                let id = format!("id{}", next_id.fetch_add(1, Ordering::Relaxed));
                item["id"] = Value::String(id.clone());
                items.insert(id, item.clone());
                (201, item.to_string())
            }
            ("GET", false) => match items.get(id) {
                Some(item) => (200, item.to_string()),
                None => (404, r#"{"error":"not found"}"#.to_string()),
            },
            ("PUT", false) => {
                if !items.contains_key(id) {
                    return (404, r#"{"error":"not found"}"#.to_string());
                }
                let mut item = req.json();
                item["id"] = Value::String(id.to_string());
                items.insert(id.to_string(), item.clone());
                (200, item.to_string())
            }
            ("DELETE", false) => match items.remove(id) {
                Some(_) => (204, String::new()),
                None => (404, r#"{"error":"not found"}"#.to_string()),
            },
            _ => (405, r#"{"error":"method not allowed"}"#.to_string()),
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
