//! Worksheet Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{Employee, WorksheetEntry, WorksheetEntryCreate, WorksheetEntryUpdate};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

const COLUMNS: &str =
    "id, employee_id, email, task, hours_worked, date, payment_request_id, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<WorksheetEntry>> {
    let sql = format!("SELECT {COLUMNS} FROM worksheet_entry WHERE id = ?");
    let entry = sqlx::query_as::<_, WorksheetEntry>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(entry)
}

/// Entries of one employee, newest first
pub async fn find_by_employee(pool: &SqlitePool, employee_id: i64) -> RepoResult<Vec<WorksheetEntry>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM worksheet_entry WHERE employee_id = ? ORDER BY date DESC, created_at DESC"
    );
    let entries = sqlx::query_as::<_, WorksheetEntry>(&sql)
        .bind(employee_id)
        .fetch_all(pool)
        .await?;
    Ok(entries)
}

/// All entries, optionally filtered by employee email and a `[from, to)` date range
pub async fn find_filtered(
    pool: &SqlitePool,
    email: Option<&str>,
    range: Option<(NaiveDate, NaiveDate)>,
) -> RepoResult<Vec<WorksheetEntry>> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM worksheet_entry WHERE 1 = 1"));
    if let Some(email) = email {
        qb.push(" AND email = ")
            .push_bind(email.to_lowercase())
            .push(" COLLATE NOCASE");
    }
    if let Some((from, to)) = range {
        qb.push(" AND date >= ").push_bind(from);
        qb.push(" AND date < ").push_bind(to);
    }
    qb.push(" ORDER BY date DESC, created_at DESC");

    let entries = qb.build_query_as::<WorksheetEntry>().fetch_all(pool).await?;
    Ok(entries)
}

pub async fn create(
    pool: &SqlitePool,
    owner: &Employee,
    data: &WorksheetEntryCreate,
) -> RepoResult<WorksheetEntry> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO worksheet_entry (id, employee_id, email, task, hours_worked, date, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(owner.id)
    .bind(&owner.email)
    .bind(data.task.trim())
    .bind(data.hours_worked)
    .bind(data.date)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create worksheet entry".into()))
}

/// Update an unclaimed entry. Returns `None` when the entry is missing or
/// already claimed by a payment request.
pub async fn update_unclaimed(
    pool: &SqlitePool,
    id: i64,
    data: &WorksheetEntryUpdate,
) -> RepoResult<Option<WorksheetEntry>> {
    let rows = sqlx::query(
        "UPDATE worksheet_entry SET task = COALESCE(?1, task), hours_worked = COALESCE(?2, hours_worked), \
         date = COALESCE(?3, date), updated_at = ?4 WHERE id = ?5 AND payment_request_id IS NULL",
    )
    .bind(data.task.as_deref().map(str::trim))
    .bind(data.hours_worked)
    .bind(data.date)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

/// Delete an unclaimed entry. Returns false when nothing was deleted.
pub async fn delete_unclaimed(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM worksheet_entry WHERE id = ? AND payment_request_id IS NULL")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Total hours ever logged by an employee
pub async fn total_hours(executor: impl SqliteExecutor<'_>, employee_id: i64) -> RepoResult<f64> {
    let total: f64 = sqlx::query_scalar(
        "SELECT CAST(COALESCE(SUM(hours_worked), 0) AS REAL) FROM worksheet_entry WHERE employee_id = ?",
    )
    .bind(employee_id)
    .fetch_one(executor)
    .await?;
    Ok(total)
}

/// Hours not covered by a paid request (unclaimed, or claimed by a pending one)
pub async fn unpaid_hours(executor: impl SqliteExecutor<'_>, employee_id: i64) -> RepoResult<f64> {
    let total: f64 = sqlx::query_scalar(
        "SELECT CAST(COALESCE(SUM(w.hours_worked), 0) AS REAL) FROM worksheet_entry w \
         LEFT JOIN payment_request p ON p.id = w.payment_request_id \
         WHERE w.employee_id = ? AND (p.id IS NULL OR p.status <> 'paid')",
    )
    .bind(employee_id)
    .fetch_one(executor)
    .await?;
    Ok(total)
}

/// Attach every unclaimed entry of the employee to a payment request
pub async fn claim_unclaimed(
    executor: impl SqliteExecutor<'_>,
    employee_id: i64,
    payment_request_id: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE worksheet_entry SET payment_request_id = ?1, updated_at = ?2 \
         WHERE employee_id = ?3 AND payment_request_id IS NULL",
    )
    .bind(payment_request_id)
    .bind(shared::util::now_millis())
    .bind(employee_id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected())
}

/// Detach entries from a (rejected) payment request
pub async fn release(executor: impl SqliteExecutor<'_>, payment_request_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE worksheet_entry SET payment_request_id = NULL, updated_at = ?1 WHERE payment_request_id = ?2",
    )
    .bind(shared::util::now_millis())
    .bind(payment_request_id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::employee;
    use shared::models::{EmployeeRegister, Role};

    async fn setup() -> (DbService, Employee) {
        let db = DbService::in_memory().await.unwrap();
        let reg = EmployeeRegister {
            name: "Ann".into(),
            photo_url: None,
            designation: None,
            bank_account_no: None,
            role: Role::Employee,
        };
        let ann = employee::create(&db.pool, "uid-1", "ann@example.com", &reg, Role::Employee)
            .await
            .unwrap();
        (db, ann)
    }

    fn entry(task: &str, hours: f64, y: i32, m: u32, d: u32) -> WorksheetEntryCreate {
        WorksheetEntryCreate {
            task: task.into(),
            hours_worked: hours,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_total_hours_empty_is_zero() {
        let (db, ann) = setup().await;
        assert_eq!(total_hours(&db.pool, ann.id).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_create_and_sum() {
        let (db, ann) = setup().await;
        create(&db.pool, &ann, &entry("Sales", 6.0, 2025, 1, 10)).await.unwrap();
        create(&db.pool, &ann, &entry("Support", 4.0, 2025, 1, 11)).await.unwrap();

        assert_eq!(total_hours(&db.pool, ann.id).await.unwrap(), 10.0);
        assert_eq!(find_by_employee(&db.pool, ann.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_month_filter() {
        let (db, ann) = setup().await;
        create(&db.pool, &ann, &entry("Sales", 6.0, 2025, 1, 31)).await.unwrap();
        create(&db.pool, &ann, &entry("Sales", 3.0, 2025, 2, 1)).await.unwrap();

        let jan = (
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        );
        let entries = find_filtered(&db.pool, Some("ANN@example.com"), Some(jan))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].hours_worked, 6.0);

        assert!(find_filtered(&db.pool, Some("bob@example.com"), None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_claimed_entries_are_locked() {
        let (db, ann) = setup().await;
        let e = create(&db.pool, &ann, &entry("Sales", 6.0, 2025, 1, 10)).await.unwrap();

        // Claim directly with a fake request id (FK off for this check)
        sqlx::query("PRAGMA foreign_keys = OFF").execute(&db.pool).await.unwrap();
        assert_eq!(claim_unclaimed(&db.pool, ann.id, 99).await.unwrap(), 1);

        let update = WorksheetEntryUpdate {
            hours_worked: Some(1.0),
            ..Default::default()
        };
        assert!(update_unclaimed(&db.pool, e.id, &update).await.unwrap().is_none());
        assert!(!delete_unclaimed(&db.pool, e.id).await.unwrap());

        assert_eq!(release(&db.pool, 99).await.unwrap(), 1);
        let updated = update_unclaimed(&db.pool, e.id, &update).await.unwrap().unwrap();
        assert_eq!(updated.hours_worked, 1.0);
        assert!(delete_unclaimed(&db.pool, e.id).await.unwrap());
    }
}
