use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_shared::api::{ErrorBody, FlashMessage};

use crate::auth::CsrfError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Csrf(#[from] CsrfError),

    #[error("Resource not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, None),
            AppError::Csrf(e) => (StatusCode::FORBIDDEN, Some(e.code())),
            AppError::NotFound => (StatusCode::NOT_FOUND, None),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, None),
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                return wrong_updating();
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                return wrong_updating();
            }
        };

        let body = Json(ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message: self.to_string(),
            code: code.map(str::to_string),
        });

        (status, body).into_response()
    }
}

fn wrong_updating() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FlashMessage::wrong_updating()),
    )
        .into_response()
}
