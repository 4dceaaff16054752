use derive_more::Display;
use payloads::ClientError;
use reqwest::StatusCode;

/// Coarse classification of a failed fetch, cheap enough to keep in state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FetchErrorKind {
    /// The request could not complete.
    #[display("network")]
    Network,
    /// The server answered with a non-success status. Such a body is
    /// never handed to the mapper, even when it is JSON, so an error page
    /// cannot be mistaken for an empty page.
    #[display("status")]
    Status,
    /// The body was not valid JSON.
    #[display("decode")]
    Decode,
    /// The data mapper rejected the payload.
    #[display("mapper")]
    Mapper,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Listing request could not complete")]
    Network(#[source] reqwest::Error),
    #[error("Listing returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Listing body is not valid JSON")]
    Decode(#[source] serde_json::Error),
    #[error("Listing payload could not be mapped")]
    Mapper(#[from] MapperError),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Network(_) => FetchErrorKind::Network,
            Self::Status { .. } => FetchErrorKind::Status,
            Self::Decode(_) => FetchErrorKind::Decode,
            Self::Mapper(_) => FetchErrorKind::Mapper,
        }
    }
}

impl From<ClientError> for FetchError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::APIError(status, body) => Self::Status { status, body },
            ClientError::Network(e) => Self::Network(e),
            ClientError::Decode(e) => Self::Decode(e),
        }
    }
}

/// Failure raised by a data mapper.
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error("Payload does not have the expected shape")]
    Shape(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
}
