use thiserror::Error;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("jwt error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
    #[error("token is missing the `{0}` claim")]
    MissingClaim(&'static str),
}
