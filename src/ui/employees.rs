use std::io::{self, BufRead, Write};

use crate::db::{DbError, EmployeeStore};
use crate::models::Employee;

use super::{finish_on_eof, or_dash, parse_date, parse_optional, Console, Flow, DATE_FORMAT};

fn print_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say("\nEmployee CRUD Menu")?;
    console.say("1. Create employee")?;
    console.say("2. Read employee")?;
    console.say("3. Update employee")?;
    console.say("4. Delete employee")?;
    console.say("5. List employees")?;
    console.say("6. Exit")
}

pub async fn run<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: EmployeeStore,
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
    S: EmployeeStore,
    R: BufRead,
    W: Write,
{
    print_menu(console)?;
    let choice = console.ask_trimmed("Choose an option (1-6): ")?;

    match choice.as_str() {
        "1" => create(store, console).await?,
        "2" => read(store, console).await?,
        "3" => update(store, console).await?,
        "4" => delete(store, console).await?,
        "5" => list(store, console).await?,
        "6" => {
            console.say("Exiting the employee program.")?;
            return Ok(Flow::Exit);
        }
        _ => console.say("Invalid option. Please try again.")?,
    }

    Ok(Flow::Continue)
}

async fn create<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: EmployeeStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("Employee RUT: ")?;
    let name = console.ask_trimmed("Name: ")?;
    let address = console.ask_trimmed("Address: ")?;
    let phone = console.ask_trimmed("Phone: ")?;
    let email = console.ask_trimmed("Email: ")?;

    let start_date = parse_date(&console.ask_trimmed("Start date (YYYY-MM-DD): ")?);
    if start_date.is_none() {
        console.say("Invalid date, it will be left empty.")?;
    }

    let salary = match console.ask_trimmed("Salary: ")?.parse::<f64>() {
        Ok(salary) => salary,
        Err(_) => {
            console.say("Invalid salary, 0 will be used.")?;
            0.0
        }
    };

    let position_code = parse_optional::<i32>(&console.ask_trimmed("Position code: ")?)
        .ok()
        .flatten();
    let department_id = parse_optional::<i32>(&console.ask_trimmed("Department ID: ")?)
        .ok()
        .flatten();

    let employee = Employee {
        rut,
        name,
        address,
        phone,
        email,
        start_date,
        salary,
        position_code,
        department_id,
    };

    match store.create_employee(&employee).await {
        Ok(()) => console.say("Employee created successfully."),
        Err(DbError::AlreadyExists) => {
            console.say("Error: an employee with that RUT already exists.")
        }
        Err(DbError::Integrity(message)) => {
            console.say(format!("Integrity error while creating employee: {message}"))
        }
        Err(err) => console.say(format!("Error creating employee: {err}")),
    }
}

async fn read<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: EmployeeStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("RUT of the employee to look up: ")?;
    let Some(employee) = lookup(store, console, &rut).await? else {
        return Ok(());
    };

    console.say("\nEmployee found:")?;
    console.say(format!("RUT: {}", employee.rut))?;
    console.say(format!("Name: {}", employee.name))?;
    console.say(format!("Address: {}", employee.address))?;
    console.say(format!("Phone: {}", employee.phone))?;
    console.say(format!("Email: {}", employee.email))?;
    console.say(format!("Start date: {}", or_dash(employee.start_date)))?;
    console.say(format!("Salary: {}", employee.salary))?;
    console.say(format!("Position code: {}", or_dash(employee.position_code)))?;
    console.say(format!("Department ID: {}", or_dash(employee.department_id)))
}

async fn update<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: EmployeeStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("RUT of the employee to update: ")?;
    let Some(mut employee) = lookup(store, console, &rut).await? else {
        return Ok(());
    };

    console.say("Leave blank to keep the current value.")?;
    employee.name = console.ask_or_keep("Name", &employee.name)?;
    employee.address = console.ask_or_keep("Address", &employee.address)?;
    employee.phone = console.ask_or_keep("Phone", &employee.phone)?;
    employee.email = console.ask_or_keep("Email", &employee.email)?;

    let date_text = console.ask_trimmed(&format!(
        "Start date ({}) [YYYY-MM-DD]: ",
        or_dash(employee.start_date.map(|d| d.format(DATE_FORMAT)))
    ))?;
    if !date_text.is_empty() {
        match parse_date(&date_text) {
            Some(date) => employee.start_date = Some(date),
            None => console.say("Invalid date, keeping the previous one.")?,
        }
    }

    let salary_text = console.ask_trimmed(&format!("Salary ({}): ", employee.salary))?;
    match parse_optional::<f64>(&salary_text) {
        Ok(Some(salary)) => employee.salary = salary,
        Ok(None) => {}
        Err(_) => console.say("Invalid salary, keeping the previous one.")?,
    }

    let position_text = console.ask_trimmed(&format!(
        "Position code ({}): ",
        or_dash(employee.position_code)
    ))?;
    match parse_optional::<i32>(&position_text) {
        Ok(Some(code)) => employee.position_code = Some(code),
        Ok(None) => {}
        Err(_) => console.say("Invalid position code, keeping the previous one.")?,
    }

    let department_text = console.ask_trimmed(&format!(
        "Department ID ({}): ",
        or_dash(employee.department_id)
    ))?;
    match parse_optional::<i32>(&department_text) {
        Ok(Some(id)) => employee.department_id = Some(id),
        Ok(None) => {}
        Err(_) => console.say("Invalid department ID, keeping the previous one.")?,
    }

    match store.update_employee(&employee).await {
        Ok(()) => console.say("Employee updated successfully."),
        Err(DbError::NotFound) => console.say("No employee found to update."),
        Err(err) => console.say(format!("Error updating employee: {err}")),
    }
}

async fn delete<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: EmployeeStore,
    R: BufRead,
    W: Write,
{
    let rut = console.ask_trimmed("RUT of the employee to delete: ")?;
    match store.delete_employee(&rut).await {
        Ok(()) => console.say("Employee deleted successfully."),
        Err(DbError::NotFound) => console.say("No employee found to delete."),
        Err(err) => console.say(format!("Error deleting employee: {err}")),
    }
}

async fn list<S, R, W>(store: &S, console: &mut Console<R, W>) -> io::Result<()>
where
    S: EmployeeStore,
    R: BufRead,
    W: Write,
{
    let employees = match store.list_employees().await {
        Ok(employees) => employees,
        Err(err) => return console.say(format!("Error listing employees: {err}")),
    };

    if employees.is_empty() {
        return console.say("No employees registered.");
    }

    console.say("\nEmployee list")?;
    console.say("-".repeat(70))?;
    for employee in &employees {
        console.say(format_row(employee))?;
    }
    Ok(())
}

fn format_row(employee: &Employee) -> String {
    let start = or_dash(employee.start_date.map(|d| d.format(DATE_FORMAT)));
    format!(
        "RUT: {:<15} | Name: {:<25} | Phone: {:<12} | Email: {:<25} | Start: {} | Salary: {}",
        employee.rut, employee.name, employee.phone, employee.email, start, employee.salary
    )
}

async fn lookup<S, R, W>(
    store: &S,
    console: &mut Console<R, W>,
    rut: &str,
) -> io::Result<Option<Employee>>
where
    S: EmployeeStore,
    R: BufRead,
    W: Write,
{
    match store.get_employee(rut).await {
        Ok(Some(employee)) => Ok(Some(employee)),
        Ok(None) => {
            console.say("Employee not found.")?;
            Ok(None)
        }
        Err(err) => {
            console.say(format!("Error reading employee: {err}"))?;
            Ok(None)
        }
    }
}
