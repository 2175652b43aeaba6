use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Inventory unavailable: {0:#}")]
    Inventory(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Inventory { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!("{self}");
        (status, self.to_string()).into_response()
    }
}
