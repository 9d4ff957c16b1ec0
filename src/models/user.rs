use std::fmt;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// Account state stored as a single character code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    /// `A` is active; any other code locks the account.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("A") => UserStatus::Active,
            _ => UserStatus::Inactive,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            UserStatus::Active => "A",
            UserStatus::Inactive => "I",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => f.write_str("Active"),
            UserStatus::Inactive => f.write_str("Inactive"),
        }
    }
}

/// Row to insert; status and creation time come from column defaults.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub rut: String,
    pub password_hash: String,
    pub role_code: String,
}

/// What login needs to know about a user
#[derive(Debug, Clone)]
pub struct Credentials {
    pub password_hash: String,
    pub status: UserStatus,
}

#[derive(Debug, Clone)]
pub struct UserSummary {
    pub rut: String,
    pub role_code: String,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub status: UserStatus,
}

impl<'r> FromRow<'r, PgRow> for Credentials {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: Option<String> = row.try_get("status")?;
        Ok(Self {
            password_hash: row.try_get("password_hash")?,
            status: UserStatus::from_code(status.as_deref()),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserSummary {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: Option<String> = row.try_get("status")?;
        Ok(Self {
            rut: row.try_get("rut")?,
            role_code: row.try_get("role_code")?,
            created_at: row.try_get("created_at")?,
            status: UserStatus::from_code(status.as_deref()),
        })
    }
}
