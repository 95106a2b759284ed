//! In-process mock of the Data API.
//!
//! Every request, whatever its path, is recorded and answered with a fixed
//! status and body.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use stragollum_rs::{Client, Database, Environment};
use tokio::net::TcpListener;

pub const TEST_TOKEN: &str = "dummy";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

struct MockState {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockDataApi {
    pub url: String,
    state: Arc<MockState>,
}

impl MockDataApi {
    /// Start a server that answers every request with `status` and `body`
    pub async fn start(status: StatusCode, body: &str) -> Self {
        let state = Arc::new(MockState {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    /// Start a server answering `200 OK` with `body`
    pub async fn ok(body: &str) -> Self {
        Self::start(StatusCode::OK, body).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request received")
    }

    /// Database handle for keyspace `ks1`, token inherited from the client
    pub fn database(&self) -> Database {
        test_client().get_database(self.url.as_str(), None, Some("ks1"))
    }
}

pub fn test_client() -> Client {
    Client::new(Some(Environment::Prod), Some(TEST_TOKEN.to_string()))
}

/// An address nothing is listening on
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body,
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}
