use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use trip_expenses::{Expense, create_expense, initialize_db};

/// A utility for creating a database of sample trip expenses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

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

    let now = OffsetDateTime::now_utc();
    let expenses = [
        Expense::build(180.0, "Food", "Rajkumar")
            .sub_category(Some("Breakfast"))
            .purpose(Some("Idli and filter coffee"))
            .date("2026-03-14")
            .time("08:15:00"),
        Expense::build(2400.0, "Transport", "Ramesh")
            .sub_category(Some("Fuel"))
            .date("2026-03-14")
            .time("10:40:00"),
        Expense::build(3500.0, "Accommodation", "Rajkumar")
            .purpose(Some("Two nights, lake view"))
            .date("2026-03-14")
            .time("14:05:00"),
        Expense::build(650.0, "Food", "Ramesh")
            .sub_category(Some("Dinner"))
            .date("2026-03-14")
            .time("20:30:00"),
        Expense::build(400.0, "Entertainments", "Ramesh")
            .purpose(Some("Boat ride"))
            .date("2026-03-15")
            .time("11:00:00"),
        Expense::build(120.0, "Others", "Rajkumar").purpose(Some("Sunscreen")),
    ];

    for expense in expenses {
        create_expense(expense, now, &conn)?;
    }

    println!("Success!");

    Ok(())
}
