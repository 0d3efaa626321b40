//! Token cookie transport.
//!
//! Tokens travel in httpOnly cookies so script running in the page can
//! never read them. `SameSite=Lax` plus explicit CORS origins covers the
//! cross-site angle; `Secure` is driven by configuration so local
//! development over plain HTTP still works.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;

use ladle_auth::token::TokenPair;
use ladle_core::config::AuthConfig;

/// Cookie holding the short-lived access token.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie holding the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Sets both token cookies from a freshly issued pair.
pub fn apply_token_cookies(jar: CookieJar, tokens: &TokenPair, config: &AuthConfig) -> CookieJar {
    let access = build_cookie(
        ACCESS_COOKIE,
        tokens.access_token.clone(),
        seconds_until(tokens.access_expires_at),
        config,
    );
    let refresh = build_cookie(
        REFRESH_COOKIE,
        tokens.refresh_token.clone(),
        seconds_until(tokens.refresh_expires_at),
        config,
    );
    jar.add(access).add(refresh)
}

/// Clears both token cookies.
pub fn clear_token_cookies(jar: CookieJar, config: &AuthConfig) -> CookieJar {
    jar.add(build_cookie(ACCESS_COOKIE, String::new(), 0, config))
        .add(build_cookie(REFRESH_COOKIE, String::new(), 0, config))
}

fn build_cookie(name: &'static str, value: String, max_age_seconds: i64, config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

fn seconds_until(expires_at: chrono::DateTime<Utc>) -> i64 {
    (expires_at - Utc::now()).num_seconds().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tokens() -> TokenPair {
        TokenPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            access_expires_at: Utc::now() + Duration::minutes(15),
            refresh_expires_at: Utc::now() + Duration::days(7),
        }
    }

    #[test]
    fn token_cookies_are_http_only() {
        let jar = apply_token_cookies(CookieJar::new(), &tokens(), &AuthConfig::default());

        for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        }
    }

    #[test]
    fn secure_flag_follows_config() {
        let config = AuthConfig {
            secure_cookies: true,
            ..AuthConfig::default()
        };
        let jar = apply_token_cookies(CookieJar::new(), &tokens(), &config);
        assert_eq!(jar.get(ACCESS_COOKIE).unwrap().secure(), Some(true));
    }

    #[test]
    fn clearing_empties_values() {
        let jar = apply_token_cookies(CookieJar::new(), &tokens(), &AuthConfig::default());
        let jar = clear_token_cookies(jar, &AuthConfig::default());

        assert_eq!(jar.get(ACCESS_COOKIE).unwrap().value(), "");
        assert_eq!(jar.get(REFRESH_COOKIE).unwrap().value(), "");
    }
}
