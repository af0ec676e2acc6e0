//! ResponseGateway trait definition.
//!
//! The single seam between the chat session and the remote answer service.
//! Implementations live in roteiro-infra (e.g., `HttpResponseGateway`).

use roteiro_types::error::GatewayError;
use roteiro_types::gateway::{AskResponse, HealthStatus};
use roteiro_types::persona::PersonaId;

/// Trait for answer service backends.
///
/// Exactly one attempt per call: implementations must not retry. Failures
/// are classified as transport, service (non-2xx) or protocol (unparseable
/// body) errors so the session can pick the right user guidance.
pub trait ResponseGateway: Send + Sync {
    /// Ask `question` on behalf of `persona`.
    fn ask(
        &self,
        question: &str,
        persona: PersonaId,
    ) -> impl std::future::Future<Output = Result<AskResponse, GatewayError>> + Send;

    /// Probe the service's health endpoint.
    fn health(
        &self,
    ) -> impl std::future::Future<Output = Result<HealthStatus, GatewayError>> + Send;
}
