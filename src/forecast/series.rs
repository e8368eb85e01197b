use std::f64::consts::PI;

use crate::config::series::*;
use crate::forecast::generator::round2;
use crate::forecast::noise::NoiseSource;
use crate::types::{DepartmentShare, ForecastPoint, ProductionPoint, StatCard};

pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

pub const FORECAST_LABELS: [&str; 6] = [
    "Ene 2025", "Feb 2025", "Mar 2025", "Abr 2025", "May 2025", "Jun 2025",
];

/// Twelve months of illustrative production: linear growth, bounded noise and
/// a ±10% sine seasonality on volume. Fresh values on every call.
pub fn generate_monthly_production_series<N: NoiseSource + ?Sized>(
    noise: &mut N,
) -> Vec<ProductionPoint> {
    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(i, &month)| {
            let i = i as i64;
            let seasonal = 1.0 + PRODUCTION_SEASONAL_AMPLITUDE * (2.0 * PI * i as f64 / 12.0).sin();
            let volume = PRODUCTION_BASE_VOLUME
                + i as f64 * PRODUCTION_VOLUME_TREND
                + noise.uniform_int(-PRODUCTION_VOLUME_NOISE, PRODUCTION_VOLUME_NOISE) as f64;
            let price = PRODUCTION_BASE_PRICE
                + i * PRODUCTION_PRICE_TREND
                + noise.uniform_int(-PRODUCTION_PRICE_NOISE, PRODUCTION_PRICE_NOISE);

            ProductionPoint {
                month,
                // Truncates toward zero.
                volume: (volume * seasonal) as i64,
                price,
            }
        })
        .collect()
}

/// Six forward months of illustrative forecasts with a confidence that decays
/// by 0.02 per month and is clamped to [0.6, 0.95].
pub fn generate_six_month_forecast_series<N: NoiseSource + ?Sized>(
    noise: &mut N,
) -> Vec<ForecastPoint> {
    FORECAST_LABELS
        .iter()
        .enumerate()
        .map(|(i, &month)| {
            let i = i as i64;
            let trend = FORECAST_BASE_VOLUME + i * FORECAST_VOLUME_TREND;
            let variation = noise.uniform_int(-FORECAST_VOLUME_NOISE, FORECAST_VOLUME_NOISE);
            let confidence = (FORECAST_BASE_CONFIDENCE - i as f64 * FORECAST_CONFIDENCE_DECAY)
                .clamp(FORECAST_MIN_CONFIDENCE, FORECAST_MAX_CONFIDENCE);

            ForecastPoint {
                month,
                predicted: trend + variation,
                confidence: round2(confidence),
            }
        })
        .collect()
}

/// Share of national production per department.
pub fn department_shares() -> Vec<DepartmentShare> {
    let table: [(&'static str, u32, i64); 6] = [
        ("Antioquia", 28, 1_680_000),
        ("Cundinamarca", 22, 1_320_000),
        ("Valle del Cauca", 18, 1_080_000),
        ("Boyacá", 15, 900_000),
        ("Nariño", 10, 600_000),
        ("Otros", 7, 420_000),
    ];
    table
        .into_iter()
        .map(|(name, value, production)| DepartmentShare {
            name,
            value,
            production,
        })
        .collect()
}

pub fn dashboard_stats() -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Contenidos Activos",
            value: "32",
            change: "+2",
            icon: "map-pin",
        },
        StatCard {
            title: "Usuarios Registrados",
            value: "1,247",
            change: "+12%",
            icon: "users",
        },
        StatCard {
            title: "Producción Mensual",
            value: "168,000 L",
            change: "+5.2%",
            icon: "trending-up",
        },
        StatCard {
            title: "Precio Promedio",
            value: "$935/L",
            change: "+2.1%",
            icon: "trending-up",
        },
    ]
}
