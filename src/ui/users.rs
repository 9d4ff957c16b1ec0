use std::io::{self, BufRead, Write};

use tracing::info;

use crate::auth::{self, LoginOutcome};
use crate::db::{DbError, UserStore};
use crate::models::{NewUser, UserSummary};

use super::{finish_on_eof, Console, Flow};

fn print_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say("\nUser Menu")?;
    console.say("1. Create user")?;
    console.say("2. Log in")?;
    console.say("3. List users")?;
    console.say("4. Deactivate user")?;
    console.say("5. Exit")
}

/// Run the user menu; `bcrypt_cost` is the work factor for new hashes
pub async fn run<S, R, W>(
    store: &S,
    console: &mut Console<R, W>,
    bcrypt_cost: u32,
) -> io::Result<()>
where
    S: UserStore,
    R: BufRead,
    W: Write,
{
    loop {
        let flow = step(store, console, bcrypt_cost).await;
        if finish_on_eof(flow, console)? == Flow::Exit {
            return Ok(());
        }
    }
}

async fn step<S, R, W>(store: &S, console: &mut Console<R, W>, bcrypt_cost: u32) -> io::Result<Flow>
where
    S: UserStore,
    R: BufRead,
    W: Write,
{
    print_menu(console)?;
    let choice = console.ask_trimmed("Select an option (1-5): ")?;

    match choice.as_str() {
        "1" => create(store, console, bcrypt_cost).await?,
        "2" => login(store, console).await?,
        "3" => list(store, console).await?,
        "4" => deactivate(store, console).await?,
        "5" => {
            console.say("Leaving the user system.")?;
            return Ok(Flow::Exit);
        }
        _ => console.say("Invalid option. Please try again.")?,
    }

    Ok(Flow::Continue)
}

async fn create<S, R, W>(store: &S, console: &mut Console<R, W>, bcrypt_cost: u32) -> io::Result<()>
where
    S: UserStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("User RUT: ")?;
    let password = console.ask_password("Password")?;
    let role_code = console
        .ask_trimmed("Role code (e.g. ADMIN or USER): ")?
        .to_uppercase();

    let password_hash = match auth::hash_password(&password, bcrypt_cost) {
        Ok(hash) => hash,
        Err(err) => return console.say(format!("Error creating user: {err}")),
    };

    let user = NewUser {
        rut,
        password_hash,
        role_code,
    };

    match store.create_user(&user).await {
        Ok(()) => console.say("User created successfully."),
        Err(DbError::AlreadyExists) => console.say("The RUT already exists."),
        Err(err) => console.say(format!("Error creating user: {err}")),
    }
}

async fn login<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: UserStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("User RUT: ")?;
    let password = console.ask_password("Password")?;

    let credentials = match store.find_credentials(&rut).await {
        Ok(credentials) => credentials,
        Err(err) => return console.say(format!("Error authenticating: {err}")),
    };

    let outcome = auth::authenticate(credentials.as_ref(), &password);
    info!(rut = %rut, outcome = ?outcome, "login attempt");

    console.say(match outcome {
        LoginOutcome::Authenticated => "Authentication successful.",
        LoginOutcome::Inactive => "The user is inactive.",
        LoginOutcome::WrongPassword => "Incorrect password.",
        LoginOutcome::UnknownUser => "User not found.",
    })
}

async fn list<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: UserStore,
    R: BufRead,
    W: Write,
{
    let users = match store.list_users().await {
        Ok(users) => users,
        Err(err) => return console.say(format!("Error listing users: {err}")),
    };

    if users.is_empty() {
        return console.say("No users registered.");
    }

    console.say("\nRegistered users:")?;
    console.say("-".repeat(60))?;
    for user in &users {
        console.say(format_row(user))?;
    }
    Ok(())
}

fn format_row(user: &UserSummary) -> String {
    let created = user
        .created_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "RUT: {:<15} | Role: {:<8} | Created: {} | Status: {}",
        user.rut, user.role_code, created, user.status
    )
}

async fn deactivate<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: UserStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("RUT of the user to deactivate: ")?;
    match store.deactivate_user(&rut).await {
        Ok(()) => console.say("User deactivated successfully."),
        Err(DbError::NotFound) => console.say("User not found."),
        Err(err) => console.say(format!("Error deactivating user: {err}")),
    }
}
