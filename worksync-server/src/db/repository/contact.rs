//! Contact Query Repository

use super::{RepoError, RepoResult};
use shared::models::{ContactQuery, ContactQueryCreate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, employee_id, email, heading, designation, details, submitted_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ContactQuery>> {
    let sql = format!("SELECT {COLUMNS} FROM contact_query WHERE id = ?");
    let query = sqlx::query_as::<_, ContactQuery>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(query)
}

/// All queries, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ContactQuery>> {
    let sql = format!("SELECT {COLUMNS} FROM contact_query ORDER BY submitted_at DESC, id DESC");
    let queries = sqlx::query_as::<_, ContactQuery>(&sql).fetch_all(pool).await?;
    Ok(queries)
}

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    employee_id: Option<i64>,
    data: &ContactQueryCreate,
) -> RepoResult<ContactQuery> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO contact_query (id, employee_id, email, heading, designation, details, submitted_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(employee_id)
    .bind(email)
    .bind(data.heading.trim())
    .bind(data.designation)
    .bind(data.details.trim())
    .bind(shared::util::now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create contact query".into()))
}
