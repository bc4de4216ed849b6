//! Page contexts: everything the page template needs to render the form.

use std::collections::BTreeMap;

use axum::extract::{OriginalUri, Path, State};
use axum::Json;
use serde::Serialize;

use tomohigara_core::locale::{LanguageLinks, Locale};
use tomohigara_core::messages::{keys, Dictionary};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Name of the page every locale route renders.
pub const BUG_REPORT_PAGE: &str = "bug-report";

#[derive(Debug, Serialize)]
pub struct PageContext {
    pub lang: Locale,
    pub page: &'static str,
    pub page_title: String,
    pub page_description: String,
    pub links: LanguageLinks,
    pub dictionary: BTreeMap<String, String>,
}

/// GET /{lang}, /{lang}/bug-report
///
/// Only supported locales have pages. Any other first segment (a static
/// file or `/api` passed through by the locale layer) is a 404.
pub async fn bug_report_page(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> AppResult<Json<DataResponse<PageContext>>> {
    let locale: Locale = lang.parse()?;
    let dictionary = state.dictionaries.get(locale);

    Ok(Json(DataResponse {
        data: PageContext {
            lang: locale,
            page: BUG_REPORT_PAGE,
            page_title: text_or_builtin(&dictionary, keys::PAGE_TITLE),
            page_description: text_or_builtin(&dictionary, keys::PAGE_DESCRIPTION),
            links: LanguageLinks::for_path(uri.path()),
            dictionary: dictionary.entries().clone(),
        },
    }))
}

/// A blank title or description is replaced by the embedded Japanese text.
fn text_or_builtin(dictionary: &Dictionary, key: &str) -> String {
    match dictionary.text(key) {
        text if text.trim().is_empty() => Dictionary::builtin(Locale::Ja).text(key).to_string(),
        text => text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
