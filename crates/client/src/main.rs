//! `tomohigara-report` -- send a bug report from the command line.
//!
//! Reads a JSON report, runs it through the same attachment rules,
//! validation and submission flow as the page form, and exits non-zero if
//! the report was not accepted.
//!
//! # Environment variables
//!
//! | Variable             | Required | Description                                   |
//! |----------------------|----------|-----------------------------------------------|
//! | `REPORT_FILE`        | yes      | Path to the JSON report                       |
//! | `VERIFICATION_TOKEN` | yes      | Anti-bot token obtained out of band           |
//!
//! plus everything read by [`ClientConfig::from_env`].
//!
//! # Report file
//!
//! ```json
//! {
//!   "fields": { "frequency": "always", "severity": "crash", "steps": "..." },
//!   "screenshots": ["shots/crash.png"]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tomohigara_client::config::ClientConfig;
use tomohigara_client::form::{BugReportForm, SubmitOutcome};
use tomohigara_client::preview::ObjectUrlRegistry;
use tomohigara_client::transport::HttpTransport;
use tomohigara_client::verification::HeadlessWidget;
use tomohigara_core::attachment::RawFile;
use tomohigara_core::error_set::FieldKey;
use tomohigara_core::fields::FormFields;
use tomohigara_core::messages::Dictionary;
use tomohigara_core::verification::VerificationToken;

#[derive(Debug, Deserialize)]
struct ReportFile {
    #[serde(default)]
    fields: FormFields,
    #[serde(default)]
    screenshots: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tomohigara_client=info,tomohigara_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    let report_path = std::env::var("REPORT_FILE").context("REPORT_FILE is required")?;
    let token = std::env::var("VERIFICATION_TOKEN").context("VERIFICATION_TOKEN is required")?;
    let token = VerificationToken::new(token)?;

    let raw = tokio::fs::read_to_string(&report_path)
        .await
        .with_context(|| format!("Failed to read report file {report_path}"))?;
    let report: ReportFile = serde_json::from_str(&raw)
        .with_context(|| format!("Report file {report_path} is not valid JSON"))?;

    let mut screenshots = Vec::with_capacity(report.screenshots.len());
    for path in &report.screenshots {
        screenshots.push(load_screenshot(path).await?);
    }

    tracing::info!(
        endpoint = %config.form_endpoint,
        locale = %config.locale,
        screenshots = screenshots.len(),
        "Starting tomohigara-report",
    );

    let transport = HttpTransport::new(config.form_endpoint.clone(), config.request_timeout)?;
    let registry = ObjectUrlRegistry::new();
    let mut form = BugReportForm::new(
        config.locale,
        Dictionary::builtin(config.locale),
        Arc::new(transport),
        Arc::new(HeadlessWidget),
        config.preview_mode.previewer(&registry),
    )
    .with_min_display(config.min_display);

    *form.fields_mut() = report.fields;
    form.on_verified(token);

    if !screenshots.is_empty() {
        let ingest = form.ingest(screenshots).await;
        tracing::info!(?ingest, "Screenshots attached");
    }

    match form.submit().await {
        SubmitOutcome::Success => {
            if let Some(panel) = form.success_panel() {
                println!("{}\n{}", panel.title, panel.message);
            }
            Ok(())
        }
        SubmitOutcome::Rejected(rejection) => {
            for key in form.errors().keys() {
                if let Some(message) = form.errors().get(key) {
                    eprintln!("{key}: {message}");
                }
            }
            bail!("Report rejected: {rejection:?}")
        }
        SubmitOutcome::Failed(err) => {
            if let Some(message) = form.errors().get(FieldKey::Form) {
                eprintln!("{message}");
            }
            Err(err.into())
        }
    }
}

/// Read one screenshot; its media type comes from the file extension.
async fn load_screenshot(path: &Path) -> anyhow::Result<RawFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read screenshot {}", path.display()))?;
    let media_type = image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(RawFile::new(name, media_type, data))
}
