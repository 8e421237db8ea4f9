use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use crate::db;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("validation")]
    Validation(String),
    #[error("invalid_credentials")]
    InvalidCredentials,
    #[error("not_found")]
    NotFound(String),

    // auth
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid_token")]
    InvalidToken,

    #[error(transparent)]
    DB(db::Error),

    #[error("unexpected")]
    Unexpected(String),
}

impl From<db::Error> for Error {
    fn from(error: db::Error) -> Self {
        match error {
            db::Error::NotFound(msg) => Self::NotFound(msg),
            error => Self::DB(error),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

impl From<Error> for ErrorResponse {
    fn from(error: Error) -> Self {
        let message = match &error {
            Error::Validation(message) => message.clone(),
            Error::InvalidCredentials => "Invalid credentials".into(),
            Error::NotFound(message) => message.clone(),
            Error::Unauthorized => "Unauthorized".into(),
            Error::InvalidToken => "Invalid token".into(),
            Error::DB(_) | Error::Unexpected(_) => {
                tracing::error!("{:?}", error);
                "Internal Server Error".into()
            }
        };

        Self { error: true, message }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Error::Validation(_) | Error::InvalidCredentials => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::InvalidToken => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut res = axum::Json(ErrorResponse::from(self)).into_response();
        *res.status_mut() = status;
        res
    }
}
