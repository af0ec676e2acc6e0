//! HttpResponseGateway -- concrete [`ResponseGateway`] over HTTP.
//!
//! Sends `POST {base_url}/api/chat` with `{question, personality_id}` and
//! reads back the answer object. One attempt per call, no retry, no client
//! timeout beyond the transport default.

use roteiro_core::gateway::ResponseGateway;
use roteiro_types::error::GatewayError;
use roteiro_types::gateway::{AskRequest, AskResponse, CHAT_PATH, HEALTH_PATH, HealthStatus};
use roteiro_types::persona::PersonaId;
use tracing::Instrument;

/// Answer service client.
pub struct HttpResponseGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResponseGateway {
    /// Create a gateway for the service rooted at `base_url`.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("roteiro/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response to a service error, keeping the body verbatim.
    async fn service_error(response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        GatewayError::Service { status, body }
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(err.to_string())
}

/// The status line arrived but the body could not be read in full.
fn body_read_error(err: reqwest::Error) -> GatewayError {
    GatewayError::Unexpected(format!("failed to read response body: {err}"))
}

impl ResponseGateway for HttpResponseGateway {
    async fn ask(&self, question: &str, persona: PersonaId) -> Result<AskResponse, GatewayError> {
        let url = self.url(CHAT_PATH);
        let span = tracing::info_span!(
            "ask",
            persona = persona.wire_token(),
            endpoint = %url,
            status = tracing::field::Empty,
        );

        async {
            let body = AskRequest {
                question: question.to_string(),
                personality_id: persona.wire_token().to_string(),
            };

            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(transport_error)?;

            let status = response.status();
            tracing::Span::current().record("status", status.as_u16());
            if !status.is_success() {
                return Err(Self::service_error(response).await);
            }

            let text = response.text().await.map_err(body_read_error)?;
            let reply: AskResponse = serde_json::from_str(&text)
                .map_err(|e| GatewayError::Protocol(format!("failed to parse answer: {e}")))?;

            tracing::debug!(
                confidence = reply.confidence,
                source = %reply.source,
                "Answer received"
            );
            Ok(reply)
        }
        .instrument(span)
        .await
    }

    async fn health(&self) -> Result<HealthStatus, GatewayError> {
        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }

        let text = response.text().await.map_err(body_read_error)?;
        serde_json::from_str(&text)
            .map_err(|e| GatewayError::Protocol(format!("failed to parse health status: {e}")))
    }
}
