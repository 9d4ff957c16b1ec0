mod clients;
mod employees;
mod users;

#[cfg(test)]
pub(crate) mod memory;

use sqlx::error::ErrorKind;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{Connection, FromRow, PgConnection, Postgres};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, ConfigError};
use crate::models::{Client, Credentials, Employee, NewUser, UserSummary};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("a row with the same key already exists")]
    AlreadyExists,

    #[error("integrity constraint violated: {0}")]
    Integrity(String),

    #[error("no matching row")]
    NotFound,

    #[error("could not connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("{0}")]
    Query(#[source] sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => return DbError::AlreadyExists,
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return DbError::Integrity(db_err.message().to_string());
                }
                _ => {}
            }
        }
        DbError::Query(err)
    }
}

/// Zero affected rows means the key did not exist.
fn expect_rows(rows_affected: u64) -> Result<(), DbError> {
    if rows_affected == 0 {
        Err(DbError::NotFound)
    } else {
        Ok(())
    }
}

/// Client rows keyed by RUT
pub trait ClientStore: Send + Sync {
    /// Insert a new client; a taken RUT is `AlreadyExists`.
    fn create_client(&self, client: &Client) -> impl Future<Output = Result<(), DbError>> + Send;

    fn get_client(
        &self,
        rut: &str,
    ) -> impl Future<Output = Result<Option<Client>, DbError>> + Send;

    /// Overwrite every non-key column; an unknown RUT is `NotFound`.
    fn update_client(&self, client: &Client) -> impl Future<Output = Result<(), DbError>> + Send;

    fn delete_client(&self, rut: &str) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// Employee rows keyed by RUT
pub trait EmployeeStore: Send + Sync {
    fn create_employee(
        &self,
        employee: &Employee,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    fn get_employee(
        &self,
        rut: &str,
    ) -> impl Future<Output = Result<Option<Employee>, DbError>> + Send;

    fn update_employee(
        &self,
        employee: &Employee,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    fn delete_employee(&self, rut: &str) -> impl Future<Output = Result<(), DbError>> + Send;

    /// All employees ordered by name
    fn list_employees(&self) -> impl Future<Output = Result<Vec<Employee>, DbError>> + Send;
}

/// User accounts keyed by RUT
pub trait UserStore: Send + Sync {
    fn create_user(&self, user: &NewUser) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Hash and status for a login attempt, `None` if the RUT is unknown
    fn find_credentials(
        &self,
        rut: &str,
    ) -> impl Future<Output = Result<Option<Credentials>, DbError>> + Send;

    /// Newest accounts first
    fn list_users(&self) -> impl Future<Output = Result<Vec<UserSummary>, DbError>> + Send;

    /// Mark the account inactive; an unknown RUT is `NotFound`.
    fn deactivate_user(&self, rut: &str) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// Connection factory: every statement gets its own connection
#[derive(Debug, Clone)]
pub struct Database {
    options: PgConnectOptions,
}

impl Database {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            options: config.connect_options()?,
        })
    }

    /// Open a fresh connection
    pub async fn connect(&self) -> Result<PgConnection, DbError> {
        debug!(
            host = self.options.get_host(),
            port = self.options.get_port(),
            "opening database connection"
        );
        PgConnection::connect_with(&self.options)
            .await
            .map_err(DbError::Connection)
    }

    async fn release(conn: PgConnection) {
        if let Err(err) = conn.close().await {
            warn!(error = %err, "failed to close database connection");
        } else {
            debug!("database connection closed");
        }
    }

    /// Run one write statement and return the affected row count
    pub(crate) async fn execute(
        &self,
        query: Query<'_, Postgres, PgArguments>,
    ) -> Result<u64, DbError> {
        let mut conn = self.connect().await?;
        let result = query.execute(&mut conn).await;
        Self::release(conn).await;
        Ok(result?.rows_affected())
    }

    pub(crate) async fn fetch_optional<O>(
        &self,
        query: QueryAs<'_, Postgres, O, PgArguments>,
    ) -> Result<Option<O>, DbError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let mut conn = self.connect().await?;
        let result = query.fetch_optional(&mut conn).await;
        Self::release(conn).await;
        Ok(result?)
    }

    pub(crate) async fn fetch_all<O>(
        &self,
        query: QueryAs<'_, Postgres, O, PgArguments>,
    ) -> Result<Vec<O>, DbError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        let mut conn = self.connect().await?;
        let result = query.fetch_all(&mut conn).await;
        Self::release(conn).await;
        Ok(result?)
    }
}

/// Build the connection helper from loaded configuration
pub fn init(config: &Config) -> Result<Database, ConfigError> {
    Database::new(config)
}
