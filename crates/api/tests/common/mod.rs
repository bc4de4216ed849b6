use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tomohigara_api::config::ServerConfig;
use tomohigara_api::dictionaries::DictionaryStore;
use tomohigara_api::router::build_app_router;
use tomohigara_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        dictionaries_dir: PathBuf::from("dictionaries"),
    }
}

/// Build the production router over the given dictionaries.
pub fn build_test_app_with(dictionaries: DictionaryStore) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        dictionaries: Arc::new(dictionaries),
    };
    build_app_router(state, &config)
}

/// Build the production router over the embedded dictionaries.
pub fn build_test_app() -> Router {
    build_test_app_with(DictionaryStore::builtin())
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
