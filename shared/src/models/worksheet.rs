//! Worksheet Model (工时记录)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Worksheet entry - one block of logged work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WorksheetEntry {
    pub id: i64,
    pub employee_id: i64,
    /// Owning employee email
    pub email: String,
    pub task: String,
    pub hours_worked: f64,
    pub date: NaiveDate,
    /// Payment request that claimed this entry (pending or paid)
    pub payment_request_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl WorksheetEntry {
    /// Claimed entries can no longer be edited or deleted
    pub fn is_locked(&self) -> bool {
        self.payment_request_id.is_some()
    }
}

/// Create worksheet entry payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetEntryCreate {
    pub task: String,
    pub hours_worked: f64,
    pub date: NaiveDate,
}

/// Update worksheet entry payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorksheetEntryUpdate {
    pub task: Option<String>,
    pub hours_worked: Option<f64>,
    pub date: Option<NaiveDate>,
}

/// Progress view filters (HR)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressQuery {
    pub email: Option<String>,
    /// 1-12
    pub month: Option<u32>,
    pub year: Option<i32>,
}
