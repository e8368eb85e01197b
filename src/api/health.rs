//! Shared counters for the /health endpoint.
//! Updated by the forecast handlers, read by `get_health`.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::api::routes::ApiState;

#[derive(Default)]
pub struct HealthState {
    /// Forecasts returned by either predict endpoint.
    pub forecasts_served: AtomicU64,
    /// Forecasts committed to the predictions table.
    pub predictions_saved: AtomicU64,
    /// Predict-and-save attempts that failed to persist.
    pub save_failures: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_forecasts_served(&self) {
        self.forecasts_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_predictions_saved(&self) {
        self.predictions_saved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_save_failures(&self) {
        self.save_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn forecasts_served(&self) -> u64 {
        self.forecasts_served.load(Ordering::Relaxed)
    }

    pub fn predictions_saved(&self) -> u64 {
        self.predictions_saved.load(Ordering::Relaxed)
    }

    pub fn save_failures(&self) -> u64 {
        self.save_failures.load(Ordering::Relaxed)
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db_ok: bool,
    pub active_sessions: usize,
    pub forecasts_served: u64,
    pub predictions_saved: u64,
    pub save_failures: u64,
}

pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let db_ok = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!("Health check database probe failed: {e}");
            false
        }
    };

    Json(HealthResponse {
        status: if db_ok { "ok" } else { "degraded" },
        db_ok,
        active_sessions: state.sessions.len(),
        forecasts_served: state.health.forecasts_served(),
        predictions_saved: state.health.predictions_saved(),
        save_failures: state.health.save_failures(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_increment() {
        let h = HealthState::new();
        assert_eq!(h.predictions_saved(), 0);
        h.inc_forecasts_served();
        h.inc_forecasts_served();
        h.inc_predictions_saved();
        h.inc_save_failures();
        assert_eq!(h.forecasts_served(), 2);
        assert_eq!(h.predictions_saved(), 1);
        assert_eq!(h.save_failures(), 1);
    }
}
