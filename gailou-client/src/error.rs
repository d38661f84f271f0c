use crate::api;

/// Everything that can go wrong while loading an article, as shown to the user
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The query could not be understood as an article link or id
    #[error("Not a valid article link or id: {0:?}")]
    InvalidInput(String),

    /// The data service could not be reached, or answered garbage
    #[error("{0}")]
    FetchFailed(String),

    /// The data service answered with an error about the request
    #[error("{detail}")]
    ServiceError { detail: String },
}

impl Error {
    pub fn fetch_failed(err: impl std::fmt::Display) -> Error {
        Error::FetchFailed(err.to_string())
    }
}

impl From<api::Error> for Error {
    fn from(e: api::Error) -> Error {
        Error::ServiceError { detail: e.detail() }
    }
}
