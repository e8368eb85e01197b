use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::PredictionRow;
use crate::db::now_ns;
use crate::error::Result;
use crate::types::{ForecastRequest, ForecastResult};

/// Appends forecasts to the `predictions` table. Rows are never updated or
/// deleted.
#[derive(Clone)]
pub struct PredictionWriter {
    pool: SqlitePool,
}

impl PredictionWriter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist one forecast for `user_id` in its own transaction. On any error
    /// the transaction is dropped, which rolls it back. No retry.
    pub async fn write_prediction(
        &self,
        user_id: i64,
        req: &ForecastRequest,
        forecast: &ForecastResult,
    ) -> Result<i64> {
        let created_at = now_ns();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO predictions (
                user_id, department, target_month, target_year,
                predicted_volume, predicted_price, confidence, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&req.department)
        .bind(req.target_month)
        .bind(req.target_year)
        .bind(forecast.volume as f64)
        .bind(forecast.price as f64)
        .bind(forecast.confidence)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!(prediction_id = id, user_id, department = %req.department, "Prediction stored");
        Ok(id)
    }

    /// Stored predictions for `user_id`, newest first.
    pub async fn predictions_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<PredictionRow>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT id, user_id, department, target_month, target_year,
                   predicted_volume, predicted_price, confidence, created_at
            FROM predictions
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_user(&self, user_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM predictions WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
