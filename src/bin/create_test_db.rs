use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use expense_tracker::{NewExpense, create_expense, initialize_db, update_monthly_income};

/// A utility for creating a test database for the expense tracker API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The monthly income to store.
    #[arg(long, default_value_t = 4200.0)]
    income: f64,
}

const SAMPLE_EXPENSES: &[(&str, f64, &str)] = &[
    ("Coffee", 4.5, "Food"),
    ("Groceries", 86.2, "Food"),
    ("Rent", 1450.0, "Housing"),
    ("Power bill", 132.75, "Utilities"),
    ("Bus pass", 60.0, "Transport"),
    ("Cinema", 18.0, "Entertainment"),
    ("Dinner out", 54.3, "Food"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    for &(name, amount, category) in SAMPLE_EXPENSES {
        create_expense(
            &NewExpense {
                name: name.to_owned(),
                amount,
                category: category.to_owned(),
            },
            &conn,
        )?;
    }

    println!("Setting monthly income to {}...", args.income);
    update_monthly_income(args.income, &conn)?;

    println!("Success!");

    Ok(())
}
