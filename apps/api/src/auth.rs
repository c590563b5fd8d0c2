use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller, resolved from the `Authorization: Bearer` header
/// against the `api_tokens` table. Every owner-scoped handler takes this
/// extractor; a missing, malformed, unknown or expired token rejects with
/// `Unauthorized` before the handler body runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = parse_bearer(header).ok_or(AppError::Unauthorized)?;

        let user_id: Option<Uuid> = sqlx::query_scalar(
            "SELECT user_id FROM api_tokens WHERE token = $1 AND expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&state.db)
        .await?;

        user_id
            .map(|user_id| AuthUser { user_id })
            .ok_or(AppError::Unauthorized)
    }
}

/// Extracts the token from a `Bearer <token>` header value.
/// The scheme is matched case-insensitively; an empty token is rejected.
fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_bearer_header() {
        assert_eq!(parse_bearer("Bearer abc123"), Some("abc123"));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(parse_bearer("bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("BEARER abc"), Some("abc"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer(""), None);
    }
}
