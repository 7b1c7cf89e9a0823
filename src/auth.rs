use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::Redirect,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::config::{Config, SessionConfig};
use crate::routes::AppState;

pub const USER_COOKIE: &str = "user_id";
pub const ADMIN_COOKIE: &str = "admin";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    pub sub: String,
    pub role: Role,
}

pub fn generate_token(config: &SessionConfig, sub: String, role: Role) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + config.expiration_days * 24 * 60 * 60,
        iat: now,
        iss: config.issuer.to_owned(),
        sub,
        role,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Returns the claims of a token signed with the current secret, unexpired and issued for us.
pub fn decode_token(config: &SessionConfig, token: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .ok()
}

/// Subject of admin tokens. Changing the admin password invalidates every admin session.
pub fn admin_fingerprint(password: &str) -> String {
    format!("{:x}", Sha3_256::digest(password.as_bytes()))
}

fn build_cookie(name: &'static str, token: String) -> Cookie<'static> {
    Cookie::build((name, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn user_cookie(config: &SessionConfig, user_id: i64) -> anyhow::Result<Cookie<'static>> {
    let token = generate_token(config, user_id.to_string(), Role::User)?;

    Ok(build_cookie(USER_COOKIE, token))
}

pub fn admin_cookie(config: &Config) -> anyhow::Result<Cookie<'static>> {
    let token = generate_token(
        &config.session,
        admin_fingerprint(&config.admin.password),
        Role::Admin,
    )?;

    Ok(build_cookie(ADMIN_COOKIE, token))
}

/// Cookie handed to [`CookieJar::remove`] so the browser drops the session.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// Id of the signed in user, without checking that the user still exists.
pub fn user_id(jar: &CookieJar, config: &SessionConfig) -> Option<i64> {
    let token = jar.get(USER_COOKIE)?.value();
    let claims = decode_token(config, token)?;

    if claims.role != Role::User {
        return None;
    }

    claims.sub.parse().ok()
}

pub fn is_admin(jar: &CookieJar, config: &Config) -> bool {
    let Some(claims) = jar
        .get(ADMIN_COOKIE)
        .and_then(|cookie| decode_token(&config.session, cookie.value()))
    else {
        return false;
    };

    claims.role == Role::Admin && claims.sub == admin_fingerprint(&config.admin.password)
}

async fn load_user(parts: &Parts, state: &AppState) -> Option<codex_user::UserRow> {
    let jar = CookieJar::from_headers(&parts.headers);
    let id = user_id(&jar, &state.config.session)?;

    match state.user_query.find(id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("{e}");
            None
        }
    }
}

/// Signed in user, anonymous visitors are sent to `/login`.
pub struct AuthUser(pub codex_user::UserRow);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        load_user(parts, state)
            .await
            .map(AuthUser)
            .ok_or(Redirect::to("/login"))
    }
}

pub struct AuthOptional(pub Option<codex_user::UserRow>);

impl FromRequestParts<AppState> for AuthOptional {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AuthOptional(load_user(parts, state).await))
    }
}

/// Admin session for pages, redirects to the admin login form.
pub struct AuthAdmin;

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        if !is_admin(&jar, &state.config) {
            return Err(Redirect::to("/admin"));
        }

        Ok(AuthAdmin)
    }
}

/// Admin session for mutations, answers 401 when missing.
pub struct AuthAdminAction;

impl FromRequestParts<AppState> for AuthAdminAction {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        if !is_admin(&jar, &state.config) {
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(AuthAdminAction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionConfig {
        SessionConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            issuer: "codex".to_string(),
            audience: "codex".to_string(),
            expiration_days: 7,
        }
    }

    #[test]
    fn test_token_round_trip_keeps_subject_and_role() {
        let config = session();
        let token = generate_token(&config, "42".to_owned(), Role::User).unwrap();
        let claims = decode_token(&config, &token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let config = session();
        let mut other = session();
        other.secret = "another_secret_key_minimum_32_characters".to_string();

        let token = generate_token(&other, "42".to_owned(), Role::User).unwrap();

        assert!(decode_token(&config, &token).is_none());
    }

    #[test]
    fn test_user_id_ignores_admin_tokens() {
        let config = session();
        let token = generate_token(&config, "42".to_owned(), Role::Admin).unwrap();
        let jar = CookieJar::new().add(build_cookie(USER_COOKIE, token));

        assert_eq!(user_id(&jar, &config), None);
    }

    #[test]
    fn test_admin_fingerprint_tracks_password() {
        assert_eq!(admin_fingerprint("changeme").len(), 64);
        assert_eq!(admin_fingerprint("changeme"), admin_fingerprint("changeme"));
        assert_ne!(admin_fingerprint("changeme"), admin_fingerprint("changed"));
    }
}
