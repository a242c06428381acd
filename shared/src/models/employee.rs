//! Employee Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 角色 (RBAC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Role {
    #[default]
    Employee,
    Hr,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Hr => "hr",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Self::Employee),
            "hr" => Ok(Self::Hr),
            "admin" => Ok(Self::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// 在职状态 (软删除: 解雇只改状态，不删记录)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum EmploymentStatus {
    #[default]
    Active,
    Fired,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Fired => "fired",
        }
    }
}

/// Employee entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    /// Identity provider user id
    pub uid: String,
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub designation: Option<String>,
    pub bank_account_no: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    pub status: EmploymentStatus,
    /// Hourly rate
    pub salary: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }
}

/// Registration payload (uid and email come from the session token)
///
/// No hourly rate here: salary starts unset and only an admin sets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRegister {
    pub name: String,
    pub photo_url: Option<String>,
    pub designation: Option<String>,
    pub bank_account_no: Option<String>,
    /// employee | hr (admin cannot be self-assigned)
    #[serde(default)]
    pub role: Role,
}

/// Change role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChange {
    pub role: Role,
}

/// Change employment status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: EmploymentStatus,
}

/// Adjust salary payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryChange {
    pub salary: f64,
}

/// Set verification flag payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationToggle {
    pub is_verified: bool,
}

/// Employee list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    pub role: Option<Role>,
    pub status: Option<EmploymentStatus>,
    pub verified: Option<bool>,
}
