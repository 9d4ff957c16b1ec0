use tracing::{error, info};

use super::{expect_rows, Database, DbError, UserStore};
use crate::models::{Credentials, NewUser, UserStatus, UserSummary};

impl UserStore for Database {
    async fn create_user(&self, user: &NewUser) -> Result<(), DbError> {
        let query = sqlx::query(
            r#"
            INSERT INTO usuario (rut_usuario, password_hash, codigo_rol)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&user.rut)
        .bind(&user.password_hash)
        .bind(&user.role_code);

        match self.execute(query).await {
            Ok(_) => {
                info!(rut = %user.rut, role = %user.role_code, "user created");
                Ok(())
            }
            Err(err) => {
                error!(rut = %user.rut, error = %err, "user insert failed");
                Err(err)
            }
        }
    }

    async fn find_credentials(&self, rut: &str) -> Result<Option<Credentials>, DbError> {
        self.fetch_optional(
            sqlx::query_as::<_, Credentials>(
                "SELECT password_hash, estado::text AS status FROM usuario WHERE rut_usuario = $1",
            )
            .bind(rut),
        )
        .await
        .inspect_err(|err| error!(rut, error = %err, "credential lookup failed"))
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, DbError> {
        self.fetch_all(sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT rut_usuario AS rut,
                   codigo_rol AS role_code,
                   fecha_ingreso AS created_at,
                   estado::text AS status
            FROM usuario
            ORDER BY fecha_ingreso DESC
            "#,
        ))
        .await
        .inspect_err(|err| error!(error = %err, "user listing failed"))
    }

    async fn deactivate_user(&self, rut: &str) -> Result<(), DbError> {
        let rows = self
            .execute(
                sqlx::query("UPDATE usuario SET estado = $2 WHERE rut_usuario = $1")
                    .bind(rut)
                    .bind(UserStatus::Inactive.code()),
            )
            .await?;
        expect_rows(rows)?;
        info!(rut, "user deactivated");
        Ok(())
    }
}
