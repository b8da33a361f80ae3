use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated staff principal extracted from a bearer JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// Required-credential extractor. Mutating verbs and `all=true` reads go
/// through this; a missing or invalid token never reaches the handler body.
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("missing bearer credential"))?;
        authenticate(&token)
    }
}

/// Optional-credential extractor for List, which is public unless `all=true`.
/// An absent header yields `None`; a credential that is offered is verified,
/// and a bad one is rejected outright.
#[derive(Clone, Debug)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match extract_bearer_token(&parts.headers) {
            None => Ok(OptionalAuthUser(None)),
            Some(token) => authenticate(&token).map(|user| OptionalAuthUser(Some(user))),
        }
    }
}

fn authenticate(token: &str) -> Result<AuthUser, ApiError> {
    let secret = &config::config().security.jwt_secret;
    let claims = auth::verify_token(token, secret)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    // Only staff-level principals may hold content credentials
    match claims.role.as_str() {
        "admin" | "staff" => Ok(AuthUser::from(claims)),
        other => Err(ApiError::unauthorized(format!(
            "role '{}' is not permitted to manage content",
            other
        ))),
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))?;

    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(extract_bearer_token(&headers).is_none());
    }

    #[test]
    fn test_empty_token_rejected() {
        let headers = headers_with("Bearer   ");
        assert!(extract_bearer_token(&headers).is_none());
    }
}
