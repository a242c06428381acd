//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeQuery, EmployeeRegister, EmploymentStatus, Role};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, uid, email, name, photo_url, designation, bank_account_no, role, is_verified, status, salary, created_at, updated_at";

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("SELECT {COLUMNS} FROM employee WHERE id = ?");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(employee)
}

pub async fn find_by_uid(pool: &SqlitePool, uid: &str) -> RepoResult<Option<Employee>> {
    let sql = format!("SELECT {COLUMNS} FROM employee WHERE uid = ?");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(uid)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn find_by_email(
    executor: impl SqliteExecutor<'_>,
    email: &str,
) -> RepoResult<Option<Employee>> {
    let sql = format!("SELECT {COLUMNS} FROM employee WHERE email = ? COLLATE NOCASE");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(email)
        .fetch_optional(executor)
        .await?;
    Ok(employee)
}

/// List employees with optional role / status / verification filters
pub async fn find_all(pool: &SqlitePool, query: &EmployeeQuery) -> RepoResult<Vec<Employee>> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM employee WHERE 1 = 1"));
    if let Some(role) = query.role {
        qb.push(" AND role = ").push_bind(role);
    }
    if let Some(status) = query.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(verified) = query.verified {
        qb.push(" AND is_verified = ").push_bind(verified);
    }
    qb.push(" ORDER BY name");

    let employees = qb.build_query_as::<Employee>().fetch_all(pool).await?;
    Ok(employees)
}

/// Active employees with the `employee` role (payroll view)
pub async fn find_active_staff(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    find_all(
        pool,
        &EmployeeQuery {
            role: Some(Role::Employee),
            status: Some(EmploymentStatus::Active),
            verified: None,
        },
    )
    .await
}

pub async fn create(
    pool: &SqlitePool,
    uid: &str,
    email: &str,
    data: &EmployeeRegister,
    role: Role,
) -> RepoResult<Employee> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO employee (id, uid, email, name, photo_url, designation, bank_account_no, role, is_verified, status, salary, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, 'active', NULL, ?9, ?9)",
    )
    .bind(id)
    .bind(uid)
    .bind(email)
    .bind(data.name.trim())
    .bind(&data.photo_url)
    .bind(&data.designation)
    .bind(&data.bank_account_no)
    .bind(role)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update_role(pool: &SqlitePool, id: i64, role: Role) -> RepoResult<Employee> {
    let rows = sqlx::query("UPDATE employee SET role = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(role)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    reload(pool, id, rows.rows_affected()).await
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: EmploymentStatus,
) -> RepoResult<Employee> {
    let rows = sqlx::query("UPDATE employee SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    reload(pool, id, rows.rows_affected()).await
}

pub async fn update_salary(pool: &SqlitePool, id: i64, salary: f64) -> RepoResult<Employee> {
    let rows = sqlx::query("UPDATE employee SET salary = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(salary)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    reload(pool, id, rows.rows_affected()).await
}

pub async fn set_verified(pool: &SqlitePool, id: i64, is_verified: bool) -> RepoResult<Employee> {
    let rows = sqlx::query("UPDATE employee SET is_verified = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(is_verified)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    reload(pool, id, rows.rows_affected()).await
}

/// Touch the employee row inside a transaction.
///
/// Being the first statement of the transaction, this takes SQLite's write
/// lock before anything is read. Returns false when no such employee exists.
pub async fn touch(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE employee SET updated_at = ?1 WHERE id = ?2")
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected() > 0)
}

async fn reload(pool: &SqlitePool, id: i64, rows_affected: u64) -> RepoResult<Employee> {
    if rows_affected == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}
