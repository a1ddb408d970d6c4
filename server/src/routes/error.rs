use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pagesmith::models::SaveResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::views::ViewError;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("page {0} not found")]
    NotFound(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("nothing to save: title is blank and there are no blocks")]
    EmptySave,

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    View(#[from] ViewError),
}

impl From<StoreError> for RouteError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => RouteError::NotFound(id),
            StoreError::EmptySave => RouteError::EmptySave,
            other => RouteError::Store(other),
        }
    }
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::NotFound(_) => StatusCode::NOT_FOUND,
            RouteError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            RouteError::EmptySave => StatusCode::UNPROCESSABLE_ENTITY,
            RouteError::Store(_) | RouteError::View(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        // Internal details stay in the log.
        let message = if status.is_server_error() {
            "internal error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(SaveResponse::failed(message))).into_response()
    }
}
