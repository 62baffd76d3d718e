use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown session: {0}")]
    UnknownSession(String),
    #[error("Invalid session id '{0}'")]
    InvalidSessionId(String),
}
