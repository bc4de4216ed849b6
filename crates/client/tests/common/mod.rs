//! Throwaway form backend for transport tests.
//!
//! Accepts `multipart/form-data` posts on `/` and records every part;
//! `/fail` answers 500 and `/slow` answers after two seconds.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tokio::sync::Mutex;

/// 1x1 transparent GIF.
pub const TINY_GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct Received {
    pub text: Vec<(String, String)>,
    pub files: Vec<ReceivedFile>,
}

impl Received {
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.text
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub type Inbox = Arc<Mutex<Vec<Received>>>;

async fn receive(State(inbox): State<Inbox>, mut multipart: Multipart) -> StatusCode {
    let mut received = Received::default();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
                received.files.push(ReceivedFile {
                    field: name,
                    file_name,
                    content_type,
                    data,
                });
            }
            None => {
                let value = field.text().await.unwrap_or_default();
                received.text.push((name, value));
            }
        }
    }
    inbox.lock().await.push(received);
    StatusCode::OK
}

async fn fail() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "backend down")
}

async fn slow() -> StatusCode {
    tokio::time::sleep(Duration::from_secs(2)).await;
    StatusCode::OK
}

/// Start the backend on an ephemeral port.
pub async fn spawn_backend() -> (SocketAddr, Inbox) {
    let inbox = Inbox::default();
    let app = Router::new()
        .route("/", post(receive))
        .route("/fail", post(fail))
        .route("/slow", post(slow))
        .with_state(Arc::clone(&inbox));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, inbox)
}
