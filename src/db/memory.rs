//! In-memory stores that mirror the database's key and row-count semantics.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::NaiveDateTime;

use super::{ClientStore, DbError, EmployeeStore, UserStore};
use crate::models::{Client, Credentials, Employee, NewUser, UserStatus, UserSummary};

#[derive(Clone)]
struct UserRow {
    password_hash: String,
    role_code: String,
    status: UserStatus,
    created_at: NaiveDateTime,
}

#[derive(Default)]
pub struct MemoryStore {
    clients: Mutex<BTreeMap<String, Client>>,
    employees: Mutex<BTreeMap<String, Employee>>,
    users: Mutex<BTreeMap<String, UserRow>>,
    /// Successful INSERT/UPDATE/DELETE statements
    writes: Mutex<usize>,
    /// When set, every call fails as if the server were unreachable
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    pub fn client(&self, rut: &str) -> Option<Client> {
        self.clients.lock().unwrap().get(rut).cloned()
    }

    pub fn employee(&self, rut: &str) -> Option<Employee> {
        self.employees.lock().unwrap().get(rut).cloned()
    }

    pub fn user_status(&self, rut: &str) -> Option<UserStatus> {
        self.users.lock().unwrap().get(rut).map(|row| row.status)
    }

    pub fn user_hash(&self, rut: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .get(rut)
            .map(|row| row.password_hash.clone())
    }

    /// Seed a user with an explicit creation time and status
    pub fn insert_user(
        &self,
        rut: &str,
        hash: &str,
        role: &str,
        status: UserStatus,
        created_at: NaiveDateTime,
    ) {
        self.users.lock().unwrap().insert(
            rut.to_string(),
            UserRow {
                password_hash: hash.to_string(),
                role_code: role.to_string(),
                status,
                created_at,
            },
        );
    }

    fn check_online(&self) -> Result<(), DbError> {
        if self.offline {
            return Err(DbError::Connection(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn record_write(&self) {
        *self.writes.lock().unwrap() += 1;
    }
}

impl ClientStore for MemoryStore {
    async fn create_client(&self, client: &Client) -> Result<(), DbError> {
        self.check_online()?;
        let mut clients = self.clients.lock().unwrap();
        if clients.contains_key(&client.rut) {
            return Err(DbError::AlreadyExists);
        }
        clients.insert(client.rut.clone(), client.clone());
        self.record_write();
        Ok(())
    }

    async fn get_client(&self, rut: &str) -> Result<Option<Client>, DbError> {
        self.check_online()?;
        Ok(self.client(rut))
    }

    async fn update_client(&self, client: &Client) -> Result<(), DbError> {
        self.check_online()?;
        let mut clients = self.clients.lock().unwrap();
        let slot = clients.get_mut(&client.rut).ok_or(DbError::NotFound)?;
        *slot = client.clone();
        self.record_write();
        Ok(())
    }

    async fn delete_client(&self, rut: &str) -> Result<(), DbError> {
        self.check_online()?;
        self.clients
            .lock()
            .unwrap()
            .remove(rut)
            .ok_or(DbError::NotFound)?;
        self.record_write();
        Ok(())
    }
}

impl EmployeeStore for MemoryStore {
    async fn create_employee(&self, employee: &Employee) -> Result<(), DbError> {
        self.check_online()?;
        let mut employees = self.employees.lock().unwrap();
        if employees.contains_key(&employee.rut) {
            return Err(DbError::AlreadyExists);
        }
        if employee.department_id == Some(-1) {
            return Err(DbError::Integrity(
                "violates foreign key constraint \"fk_departamento\"".to_string(),
            ));
        }
        employees.insert(employee.rut.clone(), employee.clone());
        self.record_write();
        Ok(())
    }

    async fn get_employee(&self, rut: &str) -> Result<Option<Employee>, DbError> {
        self.check_online()?;
        Ok(self.employee(rut))
    }

    async fn update_employee(&self, employee: &Employee) -> Result<(), DbError> {
        self.check_online()?;
        let mut employees = self.employees.lock().unwrap();
        let slot = employees.get_mut(&employee.rut).ok_or(DbError::NotFound)?;
        *slot = employee.clone();
        self.record_write();
        Ok(())
    }

    async fn delete_employee(&self, rut: &str) -> Result<(), DbError> {
        self.check_online()?;
        self.employees
            .lock()
            .unwrap()
            .remove(rut)
            .ok_or(DbError::NotFound)?;
        self.record_write();
        Ok(())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, DbError> {
        self.check_online()?;
        let mut all: Vec<Employee> = self.employees.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

impl UserStore for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<(), DbError> {
        self.check_online()?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.rut) {
            return Err(DbError::AlreadyExists);
        }
        users.insert(
            user.rut.clone(),
            UserRow {
                password_hash: user.password_hash.clone(),
                role_code: user.role_code.clone(),
                status: UserStatus::Active,
                created_at: chrono::Local::now().naive_local(),
            },
        );
        self.record_write();
        Ok(())
    }

    async fn find_credentials(&self, rut: &str) -> Result<Option<Credentials>, DbError> {
        self.check_online()?;
        Ok(self.users.lock().unwrap().get(rut).map(|row| Credentials {
            password_hash: row.password_hash.clone(),
            status: row.status,
        }))
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, DbError> {
        self.check_online()?;
        let mut all: Vec<UserSummary> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|(rut, row)| UserSummary {
                rut: rut.clone(),
                role_code: row.role_code.clone(),
                created_at: Some(row.created_at),
                status: row.status,
            })
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn deactivate_user(&self, rut: &str) -> Result<(), DbError> {
        self.check_online()?;
        let mut users = self.users.lock().unwrap();
        let row = users.get_mut(rut).ok_or(DbError::NotFound)?;
        row.status = UserStatus::Inactive;
        self.record_write();
        Ok(())
    }
}
