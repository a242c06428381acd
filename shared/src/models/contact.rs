//! Contact Query Model (联系/反馈)

use serde::{Deserialize, Serialize};

use super::employee::Role;

/// A question or complaint sent through the contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ContactQuery {
    pub id: i64,
    /// Set when the sender is a registered employee
    pub employee_id: Option<i64>,
    /// Sender email, taken from the session
    pub email: String,
    pub heading: String,
    /// Sender's stated position: `employee` or `hr`
    pub designation: Role,
    pub details: String,
    /// Server receive time (Unix millis)
    pub submitted_at: i64,
}

/// Contact form payload
///
/// Any client `email` or `submittedAt` is ignored; both come from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactQueryCreate {
    pub heading: String,
    #[serde(default)]
    pub designation: Role,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body_defaults_designation() {
        let body: ContactQueryCreate = serde_json::from_str(
            r#"{"heading":"Late pay","details":"March not paid","email":"x@y.z","submittedAt":"2025-03-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(body.designation, Role::Employee);
        assert_eq!(body.heading, "Late pay");

        let body: ContactQueryCreate =
            serde_json::from_str(r#"{"heading":"h","designation":"hr","details":"d"}"#).unwrap();
        assert_eq!(body.designation, Role::Hr);
    }
}
