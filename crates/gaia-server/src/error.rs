use crate::types::ErrorResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gaia_core::GaiaError;
use tracing::{error, warn};

/// Everything a handler can fail with, mapped to a status and a `{detail}` body.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Backend { op: &'static str, source: GaiaError },
}

impl ApiError {
    /// Tags a client error with the endpoint operation it surfaced from.
    pub fn backend(op: &'static str) -> impl FnOnce(GaiaError) -> ApiError {
        move |source| ApiError::Backend { op, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Backend { source, .. } => match source {
                GaiaError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                GaiaError::Transport(_)
                | GaiaError::Rejected { .. }
                | GaiaError::Decode(_)
                | GaiaError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Backend { op, source } => format!("Error in {op}: {source}"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::Validation(r.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();
        let upstream = matches!(&self, ApiError::Backend { source, .. } if source.is_backend());
        if status.is_server_error() {
            error!(%status, upstream, %detail, "request failed");
        } else {
            warn!(%status, %detail, "request rejected");
        }
        (status, Json(ErrorResponse { detail })).into_response()
    }
}
