//! Session token authentication middleware.
//!
//! Resolves the caller identity from the request token and rejects the
//! request with `NOT_LOGGED_IN` before the handler runs (and before its
//! body is parsed) when that fails.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Cookie the web front-end keeps the token in
pub const AUTH_COOKIE: &str = "Authorization";

/// Finds the session token on a request.
///
/// The `Authorization` cookie wins over the `Authorization` header, and a
/// `Bearer ` prefix on the header is stripped.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.trim().to_string());

    from_cookie
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim().to_string())
        })
        .filter(|token| !token.is_empty())
}

/// Token authentication middleware
///
/// On success a [`CallerIdentity`](crate::models::CallerIdentity) is added to
/// the request extensions for `Extension<CallerIdentity>` extraction.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers()).ok_or_else(|| AppError::Unauthorized {
        message: "Missing session token".to_string(),
    })?;

    let identity = state.tokens.decode(&token)?;
    tracing::debug!(user_id = identity.user_id, "Caller authenticated");
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_token_from_cookie() {
        let map = headers(&[(header::COOKIE, "theme=dark; Authorization=abc.def.ghi")]);
        assert_eq!(extract_token(&map).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_cookie_preferred_over_header() {
        let map = headers(&[
            (header::AUTHORIZATION, "Bearer from-header"),
            (header::COOKIE, "Authorization=from-cookie"),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_token_from_header_with_and_without_bearer() {
        let bearer = headers(&[(header::AUTHORIZATION, "Bearer tok")]);
        assert_eq!(extract_token(&bearer).as_deref(), Some("tok"));

        let raw = headers(&[(header::AUTHORIZATION, "tok")]);
        assert_eq!(extract_token(&raw).as_deref(), Some("tok"));
    }

    #[test]
    fn test_missing_or_empty_token() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        assert_eq!(extract_token(&headers(&[(header::AUTHORIZATION, "Bearer ")])), None);
        assert_eq!(extract_token(&headers(&[(header::COOKIE, "other=1")])), None);
    }
}
