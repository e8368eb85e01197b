use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use serde::Serialize;
use tracing::debug;

use crate::api::routes::ApiState;
use crate::db::models::UserRow;
use crate::db::users;
use crate::error::AppError;

/// The logged-in user behind a request's `Authorization: Bearer` token.
/// Using it as a handler argument makes the route require login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: String,
    pub created_at: i64,
    #[serde(skip)]
    pub token: String,
}

impl AuthUser {
    pub fn from_row(row: &UserRow, token: String) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            department: row.department.clone(),
            role: row.role.clone(),
            created_at: row.created_at,
            token,
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<ApiState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let user_id = state
            .sessions
            .resolve(token)
            .ok_or_else(|| AppError::Unauthorized("unknown or expired session".to_string()))?;

        let user = users::find_by_id(&state.pool, user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                debug!(user_id, "Session points at a missing or inactive user");
                AppError::Unauthorized("account is not active".to_string())
            })?;

        Ok(AuthUser::from_row(&user, token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn parses_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc123")), Some("abc123"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&headers("Basic abc123")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
