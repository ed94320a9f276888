use thiserror::Error;

/// Fallos al convertir una respuesta del backend al cuestionario canónico.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("la respuesta no es un objeto JSON reconocible")]
    UnrecognizedPayload,
    #[error("full_quiz_data no contiene JSON válido: {0}")]
    MalformedFullQuizData(#[source] serde_json::Error),
    #[error("estructura de cuestionario inválida: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("el servidor tardó demasiado en responder")]
    Timeout,
    #[error("error de conexión con el servidor: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("el servidor devolvió HTTP {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("respuesta JSON inválida: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("respuesta inesperada: {0}")]
    UnexpectedBody(&'static str),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Mensaje `detail` enviado por el servidor, si lo hubo.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Texto para el banner de error: prioriza el detalle del servidor.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Normalize(err) => format!("{fallback} ({err})"),
            ApiError::Timeout => format!("{fallback} ({self})"),
            _ => self
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err)
        }
    }
}
