use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::error::AppError;
use crate::repositories::TokenRepository;

/// Identity resolved from the `Authorization: Bearer <token>` header.
///
/// Extraction fails with 401 unless the token exists and has not expired;
/// resolution never refreshes the expiry.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// Pull the bearer credential out of the Authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token_repo = parts
            .extensions
            .get::<TokenRepository>()
            .cloned()
            .ok_or_else(|| AppError::Internal("token repository not configured".to_string()))?;

        let token = bearer_token(&parts.headers)
            .ok_or(AppError::Unauthorized)?
            .to_string();

        let (id, email) = token_repo
            .find_valid(&token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser { id, email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracts_value() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_case_insensitive_scheme() {
        let headers = headers_with_auth("bearer abc123");
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bearer_token_rejects_empty() {
        let headers = headers_with_auth("Bearer ");
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
