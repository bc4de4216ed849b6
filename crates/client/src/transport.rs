//! Delivery of a submission payload to the form-processing backend.
//!
//! [`HttpTransport`] posts the payload as `multipart/form-data` with
//! [`reqwest`]. Any non-2xx status counts as a failure even though the
//! request itself completed.

use std::time::Duration;

use async_trait::async_trait;

use crate::payload::SubmissionPayload;

/// Why a submission did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request could not be sent or the response not received.
    #[error("HTTP request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// No response within the configured request timeout.
    #[error("Request timed out")]
    Timeout,

    /// The backend answered with a non-2xx status.
    #[error("Form backend returned HTTP {status}")]
    Server { status: u16, body: String },

    /// The payload could not be encoded (invalid media type).
    #[error("Payload could not be encoded: {0}")]
    Encoding(String),
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SubmitError::Timeout
        } else {
            SubmitError::Network(err)
        }
    }
}

/// Sends a bug-report payload somewhere.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(&self, payload: SubmissionPayload) -> Result<(), SubmitError>;
}

/// Posts submissions to the form backend over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build a transport with its own client and an explicit request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SubmitError::Network)?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Reuse an existing client (connection pooling, custom TLS).
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn send(&self, payload: SubmissionPayload) -> Result<(), SubmitError> {
        let attachments = payload.files.len();
        let form = payload
            .into_multipart()
            .map_err(|e| SubmitError::Encoding(e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, attachments, "Posting bug report");

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SubmitError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let transport = HttpTransport::new("http://localhost:8888/", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:8888/");
    }

    #[test]
    fn server_error_display() {
        let err = SubmitError::Server {
            status: 502,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Form backend returned HTTP 502");
    }

    #[test]
    fn builder_error_maps_to_network() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = SubmitError::from(req_err);
        assert!(matches!(err, SubmitError::Network(_)));
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
