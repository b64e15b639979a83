#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: u16,
        message: String,
        /// `detail` field of a FastAPI error body, if the backend sent one
        detail: Option<String>,
    },

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Human-readable message shown in the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::NetworkError(_) => "Не вдалося з'єднатися з сервером".to_string(),
            Self::HttpStatus {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::HttpStatus { status, .. } => format!("Сервер повернув помилку {status}"),
            Self::DataError(_) => "Сервер повернув некоректні дані".to_string(),
            Self::ValidationError(msg) => msg.clone(),
            Self::ConfigError(_) => "Помилка конфігурації клієнта".to_string(),
        }
    }

    /// Prefixes the user message with what the user was trying to do.
    ///
    /// Validation messages already describe the problem and are returned as-is.
    pub fn describe(&self, action: &str) -> String {
        match self {
            Self::ValidationError(msg) => msg.clone(),
            other => format!("{action}: {}", other.user_message()),
        }
    }
}
