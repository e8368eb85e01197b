use sqlx::SqlitePool;

use crate::db::models::{NewUser, UserRow};
use crate::db::now_ns;
use crate::error::{AppError, Result};

const USER_COLUMNS: &str =
    "id, name, email, department, role, password_hash, created_at, is_active";

/// Insert a user and return the stored row. Duplicate emails are a
/// [`AppError::Conflict`].
pub async fn create_user(pool: &SqlitePool, user: NewUser) -> Result<UserRow> {
    if find_by_email(pool, &user.email).await?.is_some() {
        return Err(AppError::Conflict(format!("email {} is already registered", user.email)));
    }

    let created_at = now_ns();
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, department, role, password_hash, created_at, is_active)
        VALUES (?, ?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.department)
    .bind(&user.role)
    .bind(&user.password_hash)
    .bind(created_at)
    .execute(pool)
    .await
    .map_err(|e| match e {
        // Lost a race with a concurrent registration for the same email.
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("email {} is already registered", user.email))
        }
        other => AppError::Database(other),
    })?;

    Ok(UserRow {
        id: result.last_insert_rowid(),
        name: user.name,
        email: user.email,
        department: user.department,
        role: user.role,
        password_hash: user.password_hash,
        created_at,
        is_active: true,
    })
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
