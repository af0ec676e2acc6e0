use thiserror::Error;

/// Errors from key/value storage (used by trait definitions in roteiro-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from one exchange with the answer service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never completed (connect, DNS, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service error: HTTP {status}: {body}")]
    Service { status: u16, body: String },

    /// A success reply whose body is not the expected structure.
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// User-facing class of a failed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connectivity,
    Server,
    Unexpected,
}

impl FailureKind {
    /// Guidance shown in the error banner.
    pub fn guidance(&self) -> &'static str {
        match self {
            FailureKind::Connectivity => {
                "Erro de conexão com o servidor. Verifique sua internet ou tente novamente mais tarde."
            }
            FailureKind::Server => "Erro interno do servidor. Tente novamente em alguns minutos.",
            FailureKind::Unexpected => {
                "Erro inesperado. Tente recarregar a página ou reformular sua pergunta."
            }
        }
    }
}

impl From<&GatewayError> for FailureKind {
    fn from(err: &GatewayError) -> Self {
        match err {
            GatewayError::Transport(_) => FailureKind::Connectivity,
            GatewayError::Service { .. } => FailureKind::Server,
            GatewayError::Protocol(_) | GatewayError::Unexpected(_) => FailureKind::Unexpected,
        }
    }
}
