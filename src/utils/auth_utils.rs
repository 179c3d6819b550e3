use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError, http::header,
    web,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error as JwtError,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

use crate::{
    constants::{COOKIE_NAME, JWT_SECRET_KEY},
    types::responses::api_response::{ApiResponse, ErrorDetails},
    utils::locale_utils::{Messages, get_lang},
};

const BEARER: &str = "Bearer ";

/// Key material and cookie name used to verify admin sessions.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub cookie_name: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            secret: JWT_SECRET_KEY.clone(),
            cookie_name: COOKIE_NAME.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub is_staff: bool,
    pub exp: usize,
}

pub fn generate_jwt(
    config: &AuthConfig,
    subject: &str,
    is_staff: bool,
    ttl: Duration,
) -> Result<String, JwtError> {
    let claims = Claims {
        sub: subject.to_string(),
        is_staff,
        exp: (Utc::now() + ttl).timestamp().max(0) as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

pub fn decode_claims(config: &AuthConfig, token: &str) -> Result<Claims, JwtError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

fn session_token(req: &HttpRequest, config: &AuthConfig) -> Option<String> {
    if let Some(cookie) = req.cookie(&config.cookie_name) {
        return Some(cookie.value().to_string());
    }
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER))
        .map(|token| token.trim().to_string())
}

/// Proof that the request carries a valid staff session.
///
/// Taking it as a handler argument guards the route: no token or a bad one
/// answers 401, a valid token without staff rights answers 403.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub subject: String,
}

fn reject(response: HttpResponse, reason: &'static str) -> actix_web::Error {
    InternalError::from_response(reason, response).into()
}

fn authorize(req: &HttpRequest) -> Result<AdminSession, actix_web::Error> {
    let messages = Messages::new(get_lang(req));
    let unauthorized = |key: &str, fallback: &str| {
        HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
            messages.get_dashboard_message(key, fallback),
            ErrorDetails::none(),
        ))
    };

    let Some(config) = req.app_data::<web::Data<AuthConfig>>() else {
        warn!("Admin route reached without an AuthConfig registered");
        return Err(reject(
            unauthorized("auth.missing", "Admin session required."),
            "session not configured",
        ));
    };

    let Some(token) = session_token(req, config) else {
        return Err(reject(
            unauthorized("auth.missing", "Admin session required."),
            "missing session",
        ));
    };

    let claims = match decode_claims(config, &token) {
        Ok(claims) => claims,
        Err(err) => {
            warn!("Rejected admin session: {}", err);
            return Err(reject(
                unauthorized("auth.invalid", "Admin session is invalid or expired."),
                "invalid session",
            ));
        }
    };

    if !claims.is_staff {
        warn!("Non-staff subject {} tried to reach the dashboard", claims.sub);
        return Err(reject(
            HttpResponse::Forbidden().json(ApiResponse::<()>::error(
                messages.get_dashboard_message("auth.forbidden", "Staff access only."),
                ErrorDetails::none(),
            )),
            "not staff",
        ));
    }

    Ok(AdminSession {
        subject: claims.sub,
    })
}

impl FromRequest for AdminSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, http::StatusCode, test::TestRequest};

    fn config() -> AuthConfig {
        AuthConfig {
            secret: "unit-test-secret".to_string(),
            cookie_name: "admin_session".to_string(),
        }
    }

    fn request_with(token: Option<&str>, via_cookie: bool) -> HttpRequest {
        let mut req = TestRequest::default().app_data(web::Data::new(config()));
        if let Some(token) = token {
            req = if via_cookie {
                req.cookie(Cookie::new("admin_session", token.to_string()))
            } else {
                req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            };
        }
        req.to_http_request()
    }

    fn status_of(result: Result<AdminSession, actix_web::Error>) -> StatusCode {
        result.unwrap_err().error_response().status()
    }

    #[test]
    fn staff_token_is_accepted_from_cookie_or_header() {
        let token = generate_jwt(&config(), "admin-1", true, Duration::hours(1)).unwrap();
        assert_eq!(authorize(&request_with(Some(&token), true)).unwrap().subject, "admin-1");
        assert_eq!(authorize(&request_with(Some(&token), false)).unwrap().subject, "admin-1");
    }

    #[test]
    fn missing_or_forged_tokens_are_unauthorized() {
        assert_eq!(status_of(authorize(&request_with(None, true))), StatusCode::UNAUTHORIZED);

        let other = AuthConfig {
            secret: "someone-else".to_string(),
            ..config()
        };
        let forged = generate_jwt(&other, "admin-1", true, Duration::hours(1)).unwrap();
        assert_eq!(
            status_of(authorize(&request_with(Some(&forged), true))),
            StatusCode::UNAUTHORIZED
        );

        let expired = generate_jwt(&config(), "admin-1", true, Duration::hours(-2)).unwrap();
        assert_eq!(
            status_of(authorize(&request_with(Some(&expired), false))),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn non_staff_sessions_are_forbidden() {
        let token = generate_jwt(&config(), "farmer-9", false, Duration::hours(1)).unwrap();
        assert_eq!(
            status_of(authorize(&request_with(Some(&token), true))),
            StatusCode::FORBIDDEN
        );
    }
}
