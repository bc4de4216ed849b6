//! Start-up loading of the message dictionaries.
//!
//! For each supported locale the store reads `{dir}/{lang}.json`. If that
//! fails it falls back to `{dir}/ja.json`, and if that fails too, to the
//! dictionary embedded in `tomohigara-core`. Every fallback is logged.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tomohigara_core::error::CoreError;
use tomohigara_core::locale::Locale;
use tomohigara_core::messages::Dictionary;

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] CoreError),
}

/// One dictionary per supported locale.
#[derive(Debug, Clone)]
pub struct DictionaryStore {
    ja: Arc<Dictionary>,
    en: Arc<Dictionary>,
}

impl DictionaryStore {
    /// Only the embedded dictionaries.
    pub fn builtin() -> Self {
        Self {
            ja: Arc::new(Dictionary::builtin(Locale::Ja)),
            en: Arc::new(Dictionary::builtin(Locale::En)),
        }
    }

    /// Load every locale from `dir`, falling back as described above.
    pub async fn load(dir: &Path) -> Self {
        Self {
            ja: Arc::new(load_locale(dir, Locale::Ja).await),
            en: Arc::new(load_locale(dir, Locale::En).await),
        }
    }

    pub fn get(&self, locale: Locale) -> Arc<Dictionary> {
        match locale {
            Locale::Ja => Arc::clone(&self.ja),
            Locale::En => Arc::clone(&self.en),
        }
    }
}

async fn load_locale(dir: &Path, locale: Locale) -> Dictionary {
    match read_dictionary(dir, locale).await {
        Ok(dictionary) => {
            tracing::info!(%locale, "Dictionary loaded");
            return dictionary;
        }
        Err(e) => {
            tracing::warn!(%locale, error = %e, "Could not load dictionary, trying ja.json");
        }
    }

    if locale != Locale::Ja {
        match read_dictionary(dir, Locale::Ja).await {
            Ok(dictionary) => return dictionary,
            Err(e) => {
                tracing::warn!(%locale, error = %e, "Could not load ja.json fallback");
            }
        }
    }

    tracing::warn!(%locale, "Using embedded dictionary");
    Dictionary::builtin(locale)
}

async fn read_dictionary(dir: &Path, locale: Locale) -> Result<Dictionary, LoadError> {
    let path = dir.join(format!("{}.json", locale.code()));
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
    let dictionary = Dictionary::from_json(locale, &json)?;

    let missing = dictionary.missing_keys();
    if !missing.is_empty() {
        tracing::warn!(%locale, ?missing, "Dictionary is missing keys");
    }
    Ok(dictionary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, json: &str) {
        std::fs::write(dir.join(name), json).unwrap();
    }

    #[tokio::test]
    async fn files_override_embedded_text() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ja.json", r#"{"page_title": "不具合報告"}"#);
        write(dir.path(), "en.json", r#"{"page_title": "Bug report"}"#);

        let store = DictionaryStore::load(dir.path()).await;

        assert_eq!(store.get(Locale::Ja).text("page_title"), "不具合報告");
        assert_eq!(store.get(Locale::En).text("page_title"), "Bug report");
        // Keys the file does not define come from the embedded copy.
        assert_eq!(
            store.get(Locale::En).text("submit_button"),
            Dictionary::builtin(Locale::En).text("submit_button")
        );
    }

    #[tokio::test]
    async fn missing_english_file_falls_back_to_japanese_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ja.json", r#"{"page_title": "不具合報告"}"#);

        let store = DictionaryStore::load(dir.path()).await;
        let en = store.get(Locale::En);

        assert_eq!(en.locale(), Locale::Ja);
        assert_eq!(en.text("page_title"), "不具合報告");
    }

    #[tokio::test]
    async fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.json", "{ not json");

        let store = DictionaryStore::load(dir.path()).await;

        assert_eq!(*store.get(Locale::En), Dictionary::builtin(Locale::En));
        assert_eq!(*store.get(Locale::Ja), Dictionary::builtin(Locale::Ja));
    }

    #[tokio::test]
    async fn missing_directory_uses_embedded() {
        let store = DictionaryStore::load(Path::new("/nonexistent/tomohigara")).await;
        assert_eq!(*store.get(Locale::Ja), Dictionary::builtin(Locale::Ja));
        assert_eq!(*store.get(Locale::En), Dictionary::builtin(Locale::En));
    }
}
