use axum::{
    extract::{Extension, FromRequestParts},
    http::{header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{auth::token, config::config, db::DB, users::UserId, Error};

#[derive(Clone, Debug, FromRequestParts)]
pub struct BaseParams {
    pub ctx: Ctx,
    #[from_request(via(Extension))]
    pub db: DB,
}

#[derive(Debug, Serialize, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
}

#[derive(Clone, Debug)]
pub struct Ctx {
    pub user: Option<AuthUser>,
}

impl Ctx {
    pub fn new(user: Option<AuthUser>) -> Self {
        Self { user }
    }

    pub fn get_user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn require_user_id(&self) -> crate::Result<UserId> {
        self.get_user_id().ok_or(Error::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A missing or malformed Authorization header is "anonymous";
        // a token that fails verification rejects the request outright.
        let Some(token) = bearer_token(parts) else {
            return Ok(Self::new(None));
        };

        let claims = token::verify(&token, &config().access_token_secret)
            .map_err(|_| Error::InvalidToken.into_response())?;

        Ok(Self::new(Some(AuthUser {
            id: claims.sub,
            email: claims.email,
        })))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}
