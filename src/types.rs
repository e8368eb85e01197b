use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

/// Body of both predict endpoints. `target_year` is carried through to
/// persistence but plays no part in the arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub department: String,
    pub target_month: i64,
    pub target_year: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Liters.
    pub volume: i64,
    /// Currency units per liter.
    pub price: i64,
    /// Rounded to two decimals.
    pub confidence: f64,
}

// ---------------------------------------------------------------------------
// Dashboard series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ProductionPoint {
    pub month: &'static str,
    pub volume: i64,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastPoint {
    pub month: &'static str,
    pub predicted: i64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentShare {
    pub name: &'static str,
    /// Percent of national production.
    pub value: u32,
    pub production: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub icon: &'static str,
}
