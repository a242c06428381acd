//! 时间工具函数
//!
//! 工时日期以 `NaiveDate` 存储 (YYYY-MM-DD)，审计时间戳为 `i64` Unix millis。

use chrono::{Datelike, Days, NaiveDate};

use super::{AppError, AppResult};

/// 验证日期不在未来
///
/// 以 UTC 为准，允许 1 天偏差 (UTC 以东的客户端已经进入次日)
pub fn validate_not_future(date: NaiveDate) -> AppResult<()> {
    let today = chrono::Utc::now().date_naive();
    let latest = today.checked_add_days(Days::new(1)).unwrap_or(today);
    if date > latest {
        return Err(AppError::validation(format!(
            "Date {} is in the future (today is {})",
            date, today
        )));
    }
    Ok(())
}

/// 验证月份 1-12
pub fn validate_month(month: u32) -> AppResult<()> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(())
}

/// 月份区间 [start, end)
///
/// `year` 缺省时取当前年份
pub fn month_range(year: Option<i32>, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    validate_month(month)?;
    let year = year.unwrap_or_else(|| chrono::Utc::now().year());
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid year: {}", year)))?;
    let end = start
        .checked_add_months(chrono::Months::new(1))
        .ok_or_else(|| AppError::validation(format!("Invalid year: {}", year)))?;
    Ok((start, end))
}

/// 整年区间 [start, end)
pub fn year_range(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid year: {}", year)))?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid year: {}", year)))?;
    Ok((start, end))
}
