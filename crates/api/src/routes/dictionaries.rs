use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use tomohigara_core::locale::{LanguageLinks, Locale};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DictionaryResponse {
    pub lang: Locale,
    pub entries: BTreeMap<String, String>,
}

/// GET /api/v1/dictionaries/{lang}
pub async fn get_dictionary(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> AppResult<Json<DataResponse<DictionaryResponse>>> {
    let locale: Locale = lang.parse()?;
    let dictionary = state.dictionaries.get(locale);

    Ok(Json(DataResponse {
        data: DictionaryResponse {
            lang: locale,
            entries: dictionary.entries().clone(),
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct LanguageLinksQuery {
    pub path: Option<String>,
}

/// GET /api/v1/language-links?path=/en/bug-report
pub async fn language_links(
    Query(query): Query<LanguageLinksQuery>,
) -> AppResult<Json<DataResponse<LanguageLinks>>> {
    let path = query.path.unwrap_or_else(|| "/".into());
    if !path.starts_with('/') {
        return Err(AppError::BadRequest(format!(
            "path must start with '/': {path}"
        )));
    }

    Ok(Json(DataResponse {
        data: LanguageLinks::for_path(&path),
    }))
}
