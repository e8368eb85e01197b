use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::api::health::{get_health, HealthState};
use crate::auth::{hash_password, verify_password, AuthUser};
use crate::config::DEFAULT_ROLE;
use crate::db::models::{NewUser, PredictionRow};
use crate::db::{users, PredictionWriter};
use crate::error::AppError;
use crate::forecast::{
    dashboard_stats, department_shares, generate_forecast, generate_monthly_production_series,
    generate_six_month_forecast_series,
};
use crate::state::SessionStore;
use crate::types::{
    DepartmentShare, ForecastPoint, ForecastRequest, ForecastResult, ProductionPoint, StatCard,
};

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 500;

#[derive(Clone)]
pub struct ApiState {
    pub pool: sqlx::SqlitePool,
    pub sessions: Arc<SessionStore>,
    pub writer: PredictionWriter,
    pub health: Arc<HealthState>,
}

impl ApiState {
    pub fn new(pool: sqlx::SqlitePool, session_ttl: Duration) -> Self {
        Self {
            writer: PredictionWriter::new(pool.clone()),
            pool,
            sessions: SessionStore::new(session_ttl),
            health: Arc::new(HealthState::new()),
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/production", get(get_production))
        .route("/api/predictions", get(get_predictions).post(post_predictions))
        .route("/api/predict", post(post_predict))
        .route("/api/predict/history", get(get_predict_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub user: AuthUser,
    pub stats: Vec<StatCard>,
    pub production_data: Vec<ProductionPoint>,
    pub department_data: Vec<DepartmentShare>,
    pub predictions_data: Vec<ForecastPoint>,
}

/// Envelope returned by `POST /api/predict`.
#[derive(Serialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<ForecastResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    fn failure(message: String) -> Response {
        let body = PredictResponse {
            success: false,
            prediction: None,
            error: Some(message),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Accepted and ignored: the series endpoints always return the full mock data.
#[derive(Deserialize)]
pub struct SeriesQuery {
    pub department: Option<String>,
    pub year: Option<String>,
}

impl SeriesQuery {
    fn log_ignored(&self, route: &str) {
        if self.department.is_some() || self.year.is_some() {
            debug!(
                route,
                department = ?self.department,
                year = ?self.year,
                "Series filters are not applied"
            );
        }
    }
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Auth handlers
// ---------------------------------------------------------------------------

async fn register(
    State(state): State<ApiState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthUser>), AppError> {
    let password_hash = hash_password(&req.password)?;
    let user = users::create_user(
        &state.pool,
        NewUser {
            name: req.name,
            email: req.email,
            department: req.department,
            role: req.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            password_hash,
        },
    )
    .await?;

    info!(user_id = user.id, email = %user.email, "User registered");
    Ok((StatusCode::CREATED, Json(AuthUser::from_row(&user, String::new()))))
}

async fn login(
    State(state): State<ApiState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || AppError::Unauthorized("invalid credentials".to_string());

    let user = users::find_by_email(&state.pool, &req.email)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(invalid)?;

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(email = %req.email, "Login rejected: wrong password");
        return Err(invalid());
    }

    let token = state.sessions.create(user.id);
    info!(user_id = user.id, "User logged in");
    Ok(Json(LoginResponse {
        user: AuthUser::from_row(&user, token.clone()),
        token,
    }))
}

async fn logout(State(state): State<ApiState>, user: AuthUser) -> StatusCode {
    state.sessions.revoke(&user.token);
    info!(user_id = user.id, "User logged out");
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Dashboard and series handlers
// ---------------------------------------------------------------------------

async fn get_dashboard(user: AuthUser) -> Json<DashboardResponse> {
    let mut rng = rand::thread_rng();
    Json(DashboardResponse {
        user,
        stats: dashboard_stats(),
        production_data: generate_monthly_production_series(&mut rng),
        department_data: department_shares(),
        predictions_data: generate_six_month_forecast_series(&mut rng),
    })
}

async fn get_production(Query(params): Query<SeriesQuery>) -> Json<Vec<ProductionPoint>> {
    params.log_ignored("/api/production");
    Json(generate_monthly_production_series(&mut rand::thread_rng()))
}

async fn get_predictions(Query(params): Query<SeriesQuery>) -> Json<Vec<ForecastPoint>> {
    params.log_ignored("/api/predictions");
    Json(generate_six_month_forecast_series(&mut rand::thread_rng()))
}

// ---------------------------------------------------------------------------
// Forecast handlers
// ---------------------------------------------------------------------------

/// Forecast without persistence; no login required.
async fn post_predictions(
    State(state): State<ApiState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<ForecastResult>, AppError> {
    let Json(req) = payload.map_err(|e| {
        warn!("POST /api/predictions rejected: {}", e.body_text());
        AppError::InvalidInput(e.body_text())
    })?;

    let forecast = generate_forecast(
        &mut rand::thread_rng(),
        &req.department,
        req.target_month,
        req.target_year,
    );
    state.health.inc_forecasts_served();
    Ok(Json(forecast))
}

/// Forecast and store it for the logged-in user.
async fn post_predict(
    State(state): State<ApiState>,
    user: AuthUser,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(e) => {
            warn!(user_id = user.id, "POST /api/predict rejected: {}", e.body_text());
            return PredictResponse::failure(e.body_text());
        }
    };

    let forecast = generate_forecast(
        &mut rand::thread_rng(),
        &req.department,
        req.target_month,
        req.target_year,
    );
    state.health.inc_forecasts_served();

    match state.writer.write_prediction(user.id, &req, &forecast).await {
        Ok(prediction_id) => {
            state.health.inc_predictions_saved();
            info!(
                prediction_id,
                user_id = user.id,
                department = %req.department,
                target_month = req.target_month,
                target_year = req.target_year,
                volume = forecast.volume,
                price = forecast.price,
                confidence = forecast.confidence,
                "Prediction saved"
            );
            Json(PredictResponse {
                success: true,
                prediction: Some(forecast),
                error: None,
            })
            .into_response()
        }
        Err(e) => {
            state.health.inc_save_failures();
            error!(user_id = user.id, "Failed to store prediction: {e}");
            PredictResponse::failure(e.to_string())
        }
    }
}

async fn get_predict_history(
    State(state): State<ApiState>,
    user: AuthUser,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<PredictionRow>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let rows = state.writer.predictions_for_user(user.id, limit).await?;
    Ok(Json(rows))
}
