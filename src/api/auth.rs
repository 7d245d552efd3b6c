use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;

/// Credential taken from an `Authorization: Bearer <token>` header
///
/// Rejects with `AppError::NotAuthenticated` when the header is missing or
/// carries no credential, and with `AppError::InvalidCredentials` when it uses
/// another scheme. Whether the token is *correct* is decided by the handler.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::NotAuthenticated)?;

        parse_bearer(header).map(|token| BearerToken(token.to_string()))
    }
}

fn parse_bearer(header: &str) -> Result<&str, AppError> {
    let (scheme, credentials) = header
        .split_once(' ')
        .ok_or(AppError::NotAuthenticated)?;
    if scheme.is_empty() || credentials.is_empty() {
        return Err(AppError::NotAuthenticated);
    }
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::InvalidCredentials);
    }
    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc").unwrap(), "abc");
        assert_eq!(parse_bearer("bearer abc").unwrap(), "abc");
        assert_eq!(parse_bearer("Bearer a b").unwrap(), "a b");
    }

    #[test]
    fn test_missing_credentials() {
        for header in ["Bearer", "Bearer ", "Basic", ""] {
            assert!(matches!(
                parse_bearer(header),
                Err(AppError::NotAuthenticated)
            ));
        }
    }

    #[test]
    fn test_other_scheme_is_invalid() {
        assert!(matches!(
            parse_bearer("Basic dXNlcjpwYXNz"),
            Err(AppError::InvalidCredentials)
        ));
    }
}
