use thiserror::Error;

/// Shown whenever a request could not reach the server at all.
pub const UNREACHABLE_MESSAGE: &str =
    "Não foi possível conectar ao servidor. Verifique se a API está rodando.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No response was received: connection refused, DNS, TLS handshake.
    #[error("request never reached the server: {0}")]
    Network(String),
    #[error("server responded with status {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("could not build request: {0}")]
    Request(String),
}

impl GatewayError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Request(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Local form checks that block a submit before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Preencha todos os campos")]
    MissingFields,
    #[error("Valor inválido")]
    InvalidAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Erro ao carregar gastos",
            Operation::Save => "Erro ao salvar gasto",
            Operation::Delete => "Erro ao excluir gasto",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Save => "save",
            Operation::Delete => "delete",
        }
    }
}

/// Turns a gateway failure into the single message placed in the error slot.
///
/// Order: the server's own message, then the unreachable text, then the
/// operation's generic failure text.
pub fn classify(error: &GatewayError, operation: Operation) -> String {
    match error {
        GatewayError::Server {
            message: Some(message),
            ..
        } => message.clone(),
        GatewayError::Network(_) => UNREACHABLE_MESSAGE.to_string(),
        _ => operation.failure_message().to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{} failed: {source}", .operation.name())]
    Gateway {
        operation: Operation,
        #[source]
        source: GatewayError,
    },
}

impl CommandError {
    pub fn gateway(operation: Operation, source: GatewayError) -> Self {
        Self::Gateway { operation, source }
    }

    pub fn user_message(&self) -> String {
        match self {
            CommandError::Validation(err) => err.to_string(),
            CommandError::Gateway { operation, source } => classify(source, *operation),
        }
    }
}
