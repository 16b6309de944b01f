use actix_web::{Error as ActixError, FromRequest, HttpRequest, dev::Payload, web::Data};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::services::session::{SessionState, SessionUser};

/// Audience the backend's identity service puts on user access tokens.
pub const TOKEN_AUDIENCE: &str = "authenticated";

/// Access token claims as issued by the backend's identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub email: Option<String>,
    pub role: Option<String>,
    pub aud: String,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[TOKEN_AUDIENCE]);

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_ref()), &validation)
        .map(|data| data.claims)
}

/// The signed-in user of a request. Extracting it verifies the bearer token
/// and records the user in the shared [`SessionState`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionUser);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.id
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequest for AuthUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token) = bearer_token(req) else {
            return ready(Err(AppError::Unauthorized.into()));
        };

        let Some(config) = req.app_data::<Data<Config>>() else {
            log::error!("Config missing from app data; cannot verify tokens");
            return ready(Err(
                AppError::internal_server_error_message("Authentication is not configured").into(),
            ));
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(claims) => claims,
            Err(e) => {
                log::warn!("Rejected bearer token: {}", e);
                return ready(Err(AppError::Unauthorized.into()));
            }
        };

        let user = SessionUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            expires_at: claims.exp,
        };

        if let Some(session) = req.app_data::<Data<SessionState>>() {
            session.observe(user.clone());
        }

        ready(Ok(AuthUser(user)))
    }
}
