use crate::database::DatabaseError;

pub mod client;
pub mod database;
pub mod feature;
pub mod memory;
pub mod ranking;
pub mod response;
pub mod validation;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request was malformed, no store access happened.
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
    /// The record store failed during `stage`.
    #[error("{stage} failed: {source}")]
    UpstreamUnavailable {
        stage: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl SearchError {
    pub fn invalid_argument<R: Into<String>>(field: &'static str, reason: R) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    pub fn upstream(stage: &'static str, source: DatabaseError) -> Self {
        Self::UpstreamUnavailable { stage, source }
    }
}

pub type SearchResult<O> = Result<O, SearchError>;
