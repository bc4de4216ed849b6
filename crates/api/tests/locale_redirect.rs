//! Integration tests for the locale redirect layer.

mod common;

use axum::body::Body;
use axum::http::header::{ACCEPT_LANGUAGE, LOCATION};
use axum::http::{Request, StatusCode};
use common::{get, send};

async fn redirect_for(uri: &str, accept_language: Option<&str>) -> (StatusCode, Option<String>) {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = accept_language {
        builder = builder.header(ACCEPT_LANGUAGE, value);
    }
    let response = send(common::build_test_app(), builder.body(Body::empty()).unwrap()).await;
    let location = response
        .headers()
        .get(LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    (response.status(), location)
}

#[tokio::test]
async fn root_redirects_to_default_locale() {
    let (status, location) = redirect_for("/", None).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/ja/"));
}

#[tokio::test]
async fn root_redirect_follows_accept_language() {
    let (_, location) = redirect_for("/", Some("en-US,en;q=0.9,ja;q=0.5")).await;
    assert_eq!(location.as_deref(), Some("/en/"));
}

#[tokio::test]
async fn unprefixed_page_keeps_path_and_query() {
    let (status, location) = redirect_for("/bug-report?from=title", Some("en")).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/en/bug-report?from=title"));
}

#[tokio::test]
async fn unsupported_language_falls_back_to_japanese() {
    let (_, location) = redirect_for("/bug-report", Some("fr-FR,de;q=0.8")).await;
    assert_eq!(location.as_deref(), Some("/ja/bug-report"));
}

#[tokio::test]
async fn prefixed_pages_are_served() {
    for uri in ["/ja", "/en/", "/en/bug-report"] {
        let response = get(common::build_test_app(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn static_assets_and_api_are_not_redirected() {
    let response = get(common::build_test_app(), "/favicon.ico").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(common::build_test_app(), "/api/v1/dictionaries/en").await;
    assert_eq!(response.status(), StatusCode::OK);
}
