pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("http request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("index {index} out of range for {len} variant sets")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status code carried by the error, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http(ureq::Error::StatusCode(code)) => Some(*code),
            _ => None,
        }
    }
}
