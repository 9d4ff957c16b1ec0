use tracing::{error, info, warn};

use super::{expect_rows, Database, DbError, EmployeeStore};
use crate::models::Employee;

const EMPLOYEE_COLUMNS: &str = r#"
    rut_empleado AS rut,
    nombre AS name,
    direccion AS address,
    telefono AS phone,
    email,
    fecha_inicio AS start_date,
    salario::float8 AS salary,
    codigo_cargo AS position_code,
    id_departamento AS department_id
"#;

impl EmployeeStore for Database {
    async fn create_employee(&self, employee: &Employee) -> Result<(), DbError> {
        let query = sqlx::query(
            r#"
            INSERT INTO empleado (
                rut_empleado, nombre, direccion,
                telefono, email, fecha_inicio,
                salario, codigo_cargo, id_departamento
            )
            VALUES ($1, $2, $3, $4, $5, $6::date, $7::float8, $8, $9)
            "#,
        )
        .bind(&employee.rut)
        .bind(&employee.name)
        .bind(&employee.address)
        .bind(&employee.phone)
        .bind(&employee.email)
        .bind(employee.start_date)
        .bind(employee.salary)
        .bind(employee.position_code)
        .bind(employee.department_id);

        self.execute(query).await.inspect_err(|err| {
            error!(rut = %employee.rut, error = %err, "employee insert failed")
        })?;
        info!(rut = %employee.rut, "employee created");
        Ok(())
    }

    async fn get_employee(&self, rut: &str) -> Result<Option<Employee>, DbError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM empleado WHERE rut_empleado = $1");
        self.fetch_optional(sqlx::query_as::<_, Employee>(&sql).bind(rut))
            .await
            .inspect_err(|err| error!(rut, error = %err, "employee lookup failed"))
    }

    async fn update_employee(&self, employee: &Employee) -> Result<(), DbError> {
        let query = sqlx::query(
            r#"
            UPDATE empleado
            SET nombre = $2,
                direccion = $3,
                telefono = $4,
                email = $5,
                fecha_inicio = $6::date,
                salario = $7::float8,
                codigo_cargo = $8,
                id_departamento = $9
            WHERE rut_empleado = $1
            "#,
        )
        .bind(&employee.rut)
        .bind(&employee.name)
        .bind(&employee.address)
        .bind(&employee.phone)
        .bind(&employee.email)
        .bind(employee.start_date)
        .bind(employee.salary)
        .bind(employee.position_code)
        .bind(employee.department_id);

        let rows = self.execute(query).await?;
        if let Err(err) = expect_rows(rows) {
            warn!(rut = %employee.rut, "employee update matched no rows");
            return Err(err);
        }
        info!(rut = %employee.rut, "employee updated");
        Ok(())
    }

    async fn delete_employee(&self, rut: &str) -> Result<(), DbError> {
        let rows = self
            .execute(sqlx::query("DELETE FROM empleado WHERE rut_empleado = $1").bind(rut))
            .await?;
        expect_rows(rows)?;
        info!(rut, "employee deleted");
        Ok(())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, DbError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM empleado ORDER BY nombre");
        self.fetch_all(sqlx::query_as::<_, Employee>(&sql))
            .await
            .inspect_err(|err| error!(error = %err, "employee listing failed"))
    }
}
