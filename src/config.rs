use std::time::Duration;

use crate::error::{AppError, Result};

/// Length of the random bearer token handed out on login.
pub const SESSION_TOKEN_LEN: usize = 32;

/// Default bearer session lifetime (SESSION_TTL_HOURS).
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 12;

/// Role assigned at registration when the request does not name one.
pub const DEFAULT_ROLE: &str = "USER";

/// Forecast generator constants.
pub mod forecast {
    /// Liters per month for a department with multiplier 1.0 before seasonality.
    pub const BASE_VOLUME: f64 = 150_000.0;
    /// Currency units per liter at the mid-year month.
    pub const BASE_PRICE: f64 = 900.0;
    /// Amplitude of the sine seasonal adjustment on volume.
    pub const SEASONAL_AMPLITUDE: f64 = 0.15;
    /// Linear price change per month away from June.
    pub const PRICE_SLOPE_PER_MONTH: f64 = 0.02;
    /// Month with zero linear price term.
    pub const PRICE_PIVOT_MONTH: i64 = 6;
    /// Inclusive bound of the uniform noise added to volume.
    pub const VOLUME_NOISE: i64 = 5_000;
    /// Inclusive bound of the uniform noise added to price.
    pub const PRICE_NOISE: i64 = 10;
    /// Ceiling applied to the department-driven confidence term.
    pub const MAX_VOLUME_CONFIDENCE: f64 = 0.95;
}

/// Mock series constants.
pub mod series {
    pub const PRODUCTION_BASE_VOLUME: f64 = 125_000.0;
    pub const PRODUCTION_VOLUME_TREND: f64 = 3_500.0;
    pub const PRODUCTION_VOLUME_NOISE: i64 = 5_000;
    pub const PRODUCTION_SEASONAL_AMPLITUDE: f64 = 0.1;
    pub const PRODUCTION_BASE_PRICE: i64 = 850;
    pub const PRODUCTION_PRICE_TREND: i64 = 7;
    pub const PRODUCTION_PRICE_NOISE: i64 = 20;

    pub const FORECAST_BASE_VOLUME: i64 = 172_000;
    pub const FORECAST_VOLUME_TREND: i64 = 3_000;
    pub const FORECAST_VOLUME_NOISE: i64 = 2_000;
    pub const FORECAST_BASE_CONFIDENCE: f64 = 0.85;
    pub const FORECAST_CONFIDENCE_DECAY: f64 = 0.02;
    pub const FORECAST_MIN_CONFIDENCE: f64 = 0.6;
    pub const FORECAST_MAX_CONFIDENCE: f64 = 0.95;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub db_path: String,
    pub api_host: String,
    pub api_port: u16,
    /// Bearer sessions expire this long after login (SESSION_TTL_HOURS).
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "lecheml.db".to_string()),
            api_host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            session_ttl: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .map(|v| {
                    v.parse::<u64>().map_err(|_| {
                        AppError::Config("SESSION_TTL_HOURS must be a whole number of hours".to_string())
                    })
                })
                .transpose()?
                .map(|h| Duration::from_secs(h.saturating_mul(3_600)))
                .unwrap_or(Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3_600)),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
