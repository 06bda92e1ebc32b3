use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestavoError {
    #[error("Login required: {0}")]
    AuthRequired(String),

    #[error("{0}")]
    Validation(String),

    #[error("Server rejected request ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request failed after {attempts} attempts: max retries exceeded")]
    RetryExhausted { attempts: u32 },

    #[error("Busy: {0}")]
    Busy(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<RestavoError>,
    },
}

impl From<reqwest::Error> for RestavoError {
    fn from(error: reqwest::Error) -> Self {
        RestavoError::Transport(error.to_string())
    }
}

impl RestavoError {
    /// A short follow-up suggestion shown under the error, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            RestavoError::AuthRequired(_) => Some("Sign in with /login <user> <password>"),
            RestavoError::Transport(_) | RestavoError::RetryExhausted { .. } => {
                Some("Check that the backend is running and --base-url points at it")
            }
            RestavoError::ServerRejected { status: 401, .. } => {
                Some("Your session may have expired, sign in again with /login")
            }
            RestavoError::Context { source, .. } => source.hint(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        match self {
            RestavoError::ServerRejected { status, .. } => *status == 401,
            RestavoError::Context { source, .. } => source.is_unauthorized(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RestavoError>;
