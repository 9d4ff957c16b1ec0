use std::io::{self, BufRead, Write};

use crate::db::{ClientStore, DbError};
use crate::models::Client;

use super::{finish_on_eof, Console, Flow};

const WORKER_COUNT_ERROR: &str = "Error: the worker count must be an integer.";

fn print_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say("\nClient CRUD Menu")?;
    console.say("1. Create client")?;
    console.say("2. Read client")?;
    console.say("3. Update client")?;
    console.say("4. Delete client")?;
    console.say("5. Exit")
}

/// Run the client menu until the user exits or input ends
pub async fn run<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: ClientStore,
    R: BufRead,
    W: Write,
{
    loop {
        let flow = step(store, console).await;
        if finish_on_eof(flow, console)? == Flow::Exit {
            return Ok(());
        }
    }
}

async fn step<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<Flow>
where
    S: ClientStore,
    R: BufRead,
    W: Write,
{
    print_menu(console)?;
    let choice = console.ask_trimmed("Choose an option (1-5): ")?;

    match choice.as_str() {
        "1" => create(store, console).await?,
        "2" => read(store, console).await?,
        "3" => update(store, console).await?,
        "4" => delete(store, console).await?,
        "5" => {
            console.say("Exiting the program.")?;
            return Ok(Flow::Exit);
        }
        _ => console.say("Invalid option. Please choose an option between 1 and 5.")?,
    }

    Ok(Flow::Continue)
}

async fn create<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: ClientStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("Client RUT: ")?;
    let seller_rut = console.ask_trimmed("Seller RUT: ")?;
    let company_name = console.ask_trimmed("Company name: ")?;
    let Ok(worker_count) = console.ask_trimmed("Worker count: ")?.parse::<i32>() else {
        return console.say(WORKER_COUNT_ERROR);
    };
    let contact_name = console.ask_trimmed("Contact name: ")?;
    let contact_email = console.ask_trimmed("Contact email: ")?;
    let contact_phone = console.ask_trimmed("Contact phone: ")?;

    let client = Client {
        rut,
        seller_rut,
        company_name,
        worker_count,
        contact_name,
        contact_email,
        contact_phone,
    };

    match store.create_client(&client).await {
        Ok(()) => console.say("Client created successfully."),
        Err(DbError::AlreadyExists) => {
            console.say("Error: the client RUT already exists in the database.")
        }
        Err(err @ DbError::Integrity(_)) => console.say(format!("Error: {err}.")),
        Err(err) => console.say(format!("Error creating client: {err}")),
    }
}

async fn read<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: ClientStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("Client RUT to look up: ")?;
    let Some(client) = lookup(store, console, &rut).await? else {
        return Ok(());
    };

    console.say("\nClient found:")?;
    console.say(format!("Client RUT: {}", client.rut))?;
    console.say(format!("Seller RUT: {}", client.seller_rut))?;
    console.say(format!("Company Name: {}", client.company_name))?;
    console.say(format!("Worker Count: {}", client.worker_count))?;
    console.say(format!("Contact Name: {}", client.contact_name))?;
    console.say(format!("Contact Email: {}", client.contact_email))?;
    console.say(format!("Contact Phone: {}", client.contact_phone))
}

async fn update<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: ClientStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("Client RUT to update: ")?;
    let Some(mut client) = lookup(store, console, &rut).await? else {
        return Ok(());
    };

    console.say("Enter the new values (leave blank to keep the current one):")?;
    client.seller_rut = console.ask_or_keep("New seller RUT", &client.seller_rut)?;
    client.company_name = console.ask_or_keep("New company name", &client.company_name)?;
    let count = console.ask_or_keep("New worker count", &client.worker_count.to_string())?;
    let Ok(worker_count) = count.parse::<i32>() else {
        return console.say(WORKER_COUNT_ERROR);
    };
    client.worker_count = worker_count;
    client.contact_name = console.ask_or_keep("New contact name", &client.contact_name)?;
    client.contact_email = console.ask_or_keep("New contact email", &client.contact_email)?;
    client.contact_phone = console.ask_or_keep("New contact phone", &client.contact_phone)?;

    match store.update_client(&client).await {
        Ok(()) => console.say("Client updated successfully."),
        Err(DbError::NotFound) => console.say("No client found to update."),
        Err(err) => console.say(format!("Error updating client: {err}")),
    }
}

async fn delete<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: ClientStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("Client RUT to delete: ")?;
    match store.delete_client(&rut).await {
        Ok(()) => console.say("Client deleted successfully."),
        Err(DbError::NotFound) => console.say("No client found to delete."),
        Err(err) => console.say(format!("Error deleting client: {err}")),
    }
}

/// Fetch a client, reporting a miss or a failure on the console
async fn lookup<S, R, W>(
    store: &S,
    console: &mut Console<R, W>,
    rut: &str,
) -> io::Result<Option<Client>>
where
    S: ClientStore,
    R: BufRead,
    W: Write,
{
    match store.get_client(rut).await {
        Ok(Some(client)) => Ok(Some(client)),
        Ok(None) => {
            console.say("Client not found.")?;
            Ok(None)
        }
        Err(err) => {
            console.say(format!("Error reading client: {err}"))?;
            Ok(None)
        }
    }
}
