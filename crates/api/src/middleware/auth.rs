//! # Authentication Module
//!
//! HS256 bearer tokens carrying the caller's user id and role. The
//! [`require_user`] and [`require_admin`] guards verify the token, check the
//! role and insert an [`AuthUser`] extension for the handlers behind them.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use labsched_core::{
    errors::{LabError, LabResult},
    models::{Role, Viewer},
};

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Signing settings shared by login and the guards.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    secret: String,
    expiration_hours: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    pub fn issue(&self, user_id: i64, role: Role) -> LabResult<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            role,
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| LabError::Internal(Box::new(e)))
    }

    pub fn verify(&self, token: &str) -> LabResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            debug!("Rejected token: {}", e);
            LabError::Authentication("invalid or expired token".to_string())
        })?;

        Ok(data.claims)
    }
}

/// The verified caller, available to handlers as `Extension<AuthUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthUser {
    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.user_id, self.role)
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn authorize(
    state: &ApiState,
    mut request: Request,
    next: Next,
    role: Role,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| LabError::Authentication("no token provided".to_string()))?;
    let claims = state.jwt.verify(token)?;

    if claims.role != role {
        return Err(LabError::Authorization(format!("{} role required", role)).into());
    }

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
        role: claims.role,
    });
    Ok(next.run(request).await)
}

pub async fn require_user(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, request, next, Role::User).await
}

pub async fn require_admin(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, request, next, Role::Admin).await
}
