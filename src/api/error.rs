use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (network, DNS, TLS, timeout) or
    /// the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body does not parse as the API envelope.
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server answered and said no: a non-2xx status, or a 2xx envelope
    /// with `succeeded: false`.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

impl ApiError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()).unwrap_or(500),
            Self::Decode(_) => 500,
            Self::Rejected { status, .. } => *status,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }

    /// Best message available for a notice: the server's words, then the
    /// transport error text, then a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } if !message.is_empty() => message.clone(),
            Self::Transport(e) => e.to_string(),
            _ => String::from("Unknown error"),
        }
    }

    /// Like [`Self::user_message`], but with an action-specific fallback for
    /// the cases where the server said nothing useful.
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
