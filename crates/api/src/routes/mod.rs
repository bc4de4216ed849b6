pub mod dictionaries;
pub mod health;
pub mod pages;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /dictionaries/{lang}       message dictionary for a locale
/// /language-links?path=...   language switcher targets for a page path
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/dictionaries/{lang}", get(dictionaries::get_dictionary))
        .route("/language-links", get(dictionaries::language_links))
}

/// Locale-prefixed page routes. Both the top page and the bug-report page
/// render the bug-report form.
///
/// ```text
/// /{lang}              top page
/// /{lang}/             top page (redirect target)
/// /{lang}/bug-report   bug-report page
/// ```
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/{lang}", get(pages::bug_report_page))
        .route("/{lang}/", get(pages::bug_report_page))
        .route("/{lang}/bug-report", get(pages::bug_report_page))
}
