//! Unified error types for the detection report.
//! Used by: store, report, handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open detection store: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("detection query failed: {0}")]
    Query(#[source] rusqlite::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Connection(_) | Error::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(error = %self, "report request failed");
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
