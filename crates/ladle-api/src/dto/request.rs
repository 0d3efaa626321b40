//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
///
/// Length limits here reject the obviously malformed; the password policy
/// itself lives in the credential layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Display name is required"))]
    pub display_name: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// OAuth login request body for an identity the gateway has already
/// verified with the upstream provider.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OAuthLoginRequest {
    /// Provider subject identifier.
    #[validate(length(min = 1, message = "External id is required"))]
    pub external_id: String,
    /// Email address from the provider profile.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Display name from the provider profile.
    #[validate(length(min = 1, max = 100, message = "Display name is required"))]
    pub display_name: String,
}
