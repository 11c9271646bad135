use actix_web::{
    Error as ActixError, FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized,
    web::Data,
};
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::config::Config;

/// Bearer-token claims issued by the identity provider. This service only
/// verifies; it never runs a login flow of its own.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // employee id
    pub email: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.to_lowercase() == "admin"
    }

    pub fn employee_id(&self) -> Uuid {
        self.sub
    }
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth_header = req.headers().get("Authorization");

        if let Some(auth_header) = auth_header {
            if let Ok(auth_str) = auth_header.to_str() {
                if let Some(token) = auth_str.strip_prefix("Bearer ") {
                    if let Some(config) = req.app_data::<Data<Config>>() {
                        match decode::<Claims>(
                            token,
                            &DecodingKey::from_secret(config.jwt_secret.as_ref()),
                            &Validation::new(Algorithm::HS256),
                        ) {
                            Ok(token_data) => return ready(Ok(token_data.claims)),
                            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
                        }
                    }
                }
            }
        }

        ready(Err(ErrorUnauthorized(
            "Missing or invalid authorization header",
        )))
    }
}

/// Mint a token the way the identity provider would. Used by integration
/// tests and local tooling.
pub fn create_token(
    employee_id: Uuid,
    email: &str,
    role: &str,
    config: &Config,
) -> Result<String> {
    let expiration = Utc::now() + Duration::days(config.jwt_expiration_days);

    let claims = Claims {
        sub: employee_id,
        email: email.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )?;

    Ok(token)
}
