//! Synthetic production forecasts and the mock series shown on the dashboard.

pub mod department;
pub mod generator;
pub mod noise;
pub mod series;

pub use generator::generate_forecast;
pub use series::{
    dashboard_stats, department_shares, generate_monthly_production_series,
    generate_six_month_forecast_series,
};
