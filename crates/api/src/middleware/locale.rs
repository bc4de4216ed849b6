//! Locale dispatch for page requests.
//!
//! Requests whose path already carries a supported locale prefix, API and
//! framework paths, static assets and the health check pass through. Every
//! other request is answered with a temporary redirect to the same path
//! under the locale negotiated from `Accept-Language`, keeping the query.

use axum::extract::Request;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use tomohigara_core::locale::{route, RouteDecision};

/// Paths served by this server outside the locale tree.
const UNLOCALIZED: &[&str] = &["/health"];

pub async fn locale_redirect(request: Request, next: Next) -> Response {
    let uri = request.uri();
    if UNLOCALIZED.contains(&uri.path()) {
        return next.run(request).await;
    }

    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());

    match route(uri.path(), uri.query(), accept_language) {
        RouteDecision::Pass => next.run(request).await,
        RouteDecision::Redirect(target) => {
            tracing::debug!(from = %uri.path(), to = %target, "Locale redirect");
            Redirect::temporary(&target).into_response()
        }
    }
}
