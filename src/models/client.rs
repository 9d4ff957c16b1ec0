#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Client {
    pub rut: String,
    pub seller_rut: String,
    pub company_name: String,
    pub worker_count: i32,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}
