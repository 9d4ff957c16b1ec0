#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Employee {
    pub rut: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub salary: f64,
    pub position_code: Option<i32>,
    pub department_id: Option<i32>,
}
