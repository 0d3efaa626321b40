//! `AuthPrincipal` extractor — resolves the caller's identity from the
//! access token before the handler runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use ladle_auth::session::AuthenticatedPrincipal;

use crate::cookies::ACCESS_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, available to any handler that names it.
///
/// The access token is read from the `access_token` cookie, falling back
/// to an `Authorization: Bearer` header for non-browser clients.
/// Verification is purely cryptographic; no store lookup happens here.
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal(pub AuthenticatedPrincipal);

impl std::ops::Deref for AuthPrincipal {
    type Target = AuthenticatedPrincipal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let cookie_token = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());

        let bearer_token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(String::from);

        let token = cookie_token.or(bearer_token);

        let principal = state.authenticator.verify_access(token.as_deref())?;

        Ok(AuthPrincipal(principal))
    }
}
