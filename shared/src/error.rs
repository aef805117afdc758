use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::i18n;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("transaction failed")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error(transparent)]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error(transparent)]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("unauthenticated")]
    UnauthenticatedError,
    #[error("unauthorized")]
    UnauthorizedError,
    #[error("forbidden operation")]
    ForbiddenOperation,
    #[error("{0}")]
    ConversionEntityError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // バリデーションエラーはフィールドごとのローカライズ済み
            // メッセージを 422 で返す
            AppError::ValidationError(report) => {
                let errors = validation_errors(&report);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "errors": errors })),
                )
                    .into_response()
            }
            AppError::UnprocessableEntity(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": message })),
            )
                .into_response(),
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND.into_response(),
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED.into_response()
            }
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN.into_response(),
            e => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                // 内部エラーの詳細はクライアントへ返さず、共通メッセージのみ返す
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": i18n::t("messages.update_failed") })),
                )
                    .into_response()
            }
        }
    }
}

fn validation_errors(report: &garde::Report) -> BTreeMap<String, Vec<String>> {
    let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (path, error) in report.iter() {
        errors
            .entry(path.to_string())
            .or_default()
            .push(error.to_string());
    }
    errors
}

pub type AppResult<T> = Result<T, AppError>;
