/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON {success:false, message})
 * - RepoError / validation error / auth error を統一的に変換
 *
 * Note:
 * - 所有権違反は互換性のため 401 (403 ではない) を返す。既存クライアント契約。
 * - 500 は詳細を一切返さない。内部事情は tracing 側のログにだけ残す。
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Unauthorized { message: &'static str },
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("{message}")]
    Validation { message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn unauthorized(message: &'static str) -> Self {
        Self::Unauthorized { message }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message.to_string()),
            AppError::NotFound { resource } => {
                (StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            AppError::Validation { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong".to_string(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Db(_) => AppError::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_401() {
        let res = AppError::unauthorized("Not authorized to access this route").into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = AppError::not_found("Clip").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let res = AppError::validation("title is required").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_hides_detail() {
        let res = AppError::Internal.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_shape() {
        let body = ErrorResponse {
            success: false,
            message: "Clip not found".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Clip not found"})
        );
    }
}
