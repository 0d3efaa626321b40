//! Auth handlers — register, login, oauth, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use ladle_core::account::AccountView;
use ladle_core::error::AppError;

use crate::cookies::{REFRESH_COOKIE, apply_token_cookies, clear_token_cookies};
use crate::dto::request::{LoginRequest, OAuthLoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, MessageResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountView>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let account = state
        .credentials
        .register(&req.email, &req.password, &req.display_name)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account.view()))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.authenticator.login(&req.email, &req.password).await?;

    let jar = apply_token_cookies(jar, &outcome.tokens, &state.config.auth);

    Ok((
        jar,
        Json(ApiResponse::ok(SessionResponse {
            access_expires_at: outcome.tokens.access_expires_at,
            refresh_expires_at: outcome.tokens.refresh_expires_at,
            account: Some(outcome.account.view()),
        })),
    ))
}

/// POST /api/auth/oauth/google
///
/// Accepts an identity the caller has already verified with the provider.
pub async fn oauth_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<OAuthLoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state
        .authenticator
        .login_oauth(&req.external_id, &req.email, &req.display_name)
        .await?;

    let jar = apply_token_cookies(jar, &outcome.tokens, &state.config.auth);

    Ok((
        jar,
        Json(ApiResponse::ok(SessionResponse {
            access_expires_at: outcome.tokens.access_expires_at,
            refresh_expires_at: outcome.tokens.refresh_expires_at,
            account: Some(outcome.account.view()),
        })),
    ))
}

/// POST /api/auth/refresh
///
/// Exchanges the refresh cookie for a fresh token pair. A replayed cookie
/// surfaces as 401 and revokes the account's sessions server-side.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    let presented = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    let tokens = state.authenticator.refresh(presented.as_deref()).await?;

    let jar = apply_token_cookies(jar, &tokens, &state.config.auth);

    Ok((
        jar,
        Json(ApiResponse::ok(SessionResponse {
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
            account: None,
        })),
    ))
}

/// POST /api/auth/logout
///
/// Revokes the presented refresh token server-side and clears both token
/// cookies. Succeeds even without a valid session.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    let presented = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    state.authenticator.logout(presented.as_deref()).await?;

    let jar = clear_token_cookies(jar, &state.config.auth);

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out".to_string(),
        })),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    principal: AuthPrincipal,
) -> Result<Json<ApiResponse<AccountView>>, ApiError> {
    let account = state
        .accounts
        .find_by_id(principal.account_id)
        .await?
        .ok_or_else(|| AppError::not_found("Account not found"))?;

    Ok(Json(ApiResponse::ok(account.view())))
}
