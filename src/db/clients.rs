use tracing::{error, info, warn};

use super::{expect_rows, ClientStore, Database, DbError};
use crate::models::Client;

const SELECT_CLIENT: &str = r#"
    SELECT rut_cliente AS rut,
           rut_vendedor AS seller_rut,
           razon_social AS company_name,
           cantidad_trabajadores AS worker_count,
           nombre_contacto AS contact_name,
           email_contacto AS contact_email,
           telefono_contacto AS contact_phone
    FROM cliente
    WHERE rut_cliente = $1
"#;

impl ClientStore for Database {
    async fn create_client(&self, client: &Client) -> Result<(), DbError> {
        let query = sqlx::query(
            r#"
            INSERT INTO cliente (
                rut_cliente, rut_vendedor, razon_social,
                cantidad_trabajadores, nombre_contacto,
                email_contacto, telefono_contacto
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&client.rut)
        .bind(&client.seller_rut)
        .bind(&client.company_name)
        .bind(client.worker_count)
        .bind(&client.contact_name)
        .bind(&client.contact_email)
        .bind(&client.contact_phone);

        match self.execute(query).await {
            Ok(_) => {
                info!(rut = %client.rut, "client created");
                Ok(())
            }
            Err(err) => {
                error!(rut = %client.rut, error = %err, "client insert failed");
                Err(err)
            }
        }
    }

    async fn get_client(&self, rut: &str) -> Result<Option<Client>, DbError> {
        self.fetch_optional(sqlx::query_as::<_, Client>(SELECT_CLIENT).bind(rut))
            .await
            .inspect_err(|err| error!(rut, error = %err, "client lookup failed"))
    }

    async fn update_client(&self, client: &Client) -> Result<(), DbError> {
        let query = sqlx::query(
            r#"
            UPDATE cliente
            SET rut_vendedor = $2,
                razon_social = $3,
                cantidad_trabajadores = $4,
                nombre_contacto = $5,
                email_contacto = $6,
                telefono_contacto = $7
            WHERE rut_cliente = $1
            "#,
        )
        .bind(&client.rut)
        .bind(&client.seller_rut)
        .bind(&client.company_name)
        .bind(client.worker_count)
        .bind(&client.contact_name)
        .bind(&client.contact_email)
        .bind(&client.contact_phone);

        let rows = self.execute(query).await?;
        match expect_rows(rows) {
            Ok(()) => {
                info!(rut = %client.rut, "client updated");
                Ok(())
            }
            Err(err) => {
                warn!(rut = %client.rut, "client update matched no rows");
                Err(err)
            }
        }
    }

    async fn delete_client(&self, rut: &str) -> Result<(), DbError> {
        let rows = self
            .execute(sqlx::query("DELETE FROM cliente WHERE rut_cliente = $1").bind(rut))
            .await?;
        expect_rows(rows)?;
        info!(rut, "client deleted");
        Ok(())
    }
}
