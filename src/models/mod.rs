mod client;
mod employee;
mod user;

pub use client::Client;
pub use employee::Employee;
pub use user::{Credentials, NewUser, UserStatus, UserSummary};
