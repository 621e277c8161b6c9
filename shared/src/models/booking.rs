//! Booking Model
//!
//! Write-only table reservation records; no downstream logic reads
//! them back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
    pub created_at: DateTime<Utc>,
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub guests: i32,
}

impl BookingCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("name must not be empty"));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("invalid email"));
        }
        if self.time.trim().is_empty() {
            return Err(AppError::validation("time must not be empty"));
        }
        if self.guests < 1 {
            return Err(AppError::validation("guests must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> BookingCreate {
        serde_json::from_str(
            r#"{
                "name": "Ana",
                "email": "ana@example.com",
                "phone": "+34 600 000 000",
                "date": "2026-08-14",
                "time": "19:30",
                "guests": 4
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn valid_booking_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn rejects_zero_guests() {
        let mut p = payload();
        p.guests = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_bad_email() {
        let mut p = payload();
        p.email = "not-an-email".to_string();
        assert!(p.validate().is_err());
    }
}
