use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{LedgerService, Summary};
use crate::domain::{Category, Cents, ValidationError, format_money, parse_amount};
use crate::io::Exporter;
use crate::storage::DEFAULT_RECORD_PATH;

/// Largest amount accepted from the command line (1 000 000 000.00).
pub const MAX_INPUT_CENTS: Cents = 100_000_000_000;

/// Expense Tracker - balance and categorized expenses
#[derive(Parser)]
#[command(name = "expense-tracker")]
#[command(about = "Track a cash balance and categorized expenses in a local JSON file")]
#[command(version)]
pub struct Cli {
    /// Data file path
    #[arg(short, long, env = "EXPENSE_TRACKER_FILE", default_value = DEFAULT_RECORD_PATH)]
    pub file: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add money to the balance
    AddMoney {
        /// Amount to add (e.g., "50.00" or "50")
        amount: String,
    },

    /// Record an expense and subtract it from the balance
    AddExpense {
        /// Category: single, weekly, monthly, yearly
        category: Category,

        /// Expense name
        name: String,

        /// Expense amount (e.g., "12.50")
        amount: String,
    },

    /// Remove the most recent expense of a category and refund it
    Remove {
        /// Category: single, weekly, monthly, yearly
        category: Category,
    },

    /// List all expenses of a category
    List {
        /// Category: single, weekly, monthly, yearly
        category: Category,
    },

    /// Show balance, total expenses and a category subtotal
    Summary {
        /// Category whose subtotal is shown
        #[arg(short, long, default_value = "single")]
        category: Category,
    },

    /// Verify that tracked totals match the recorded expenses
    Check,

    /// Export expenses to CSV or the whole ledger to JSON
    Export {
        /// Format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Only export this category (csv only)
        #[arg(short, long)]
        category: Option<Category>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut service = LedgerService::open(&self.file);

        match self.command {
            Commands::AddMoney { amount } => {
                ensure_within_cap(&amount)?;
                let balance = service.add_money(&amount)?;
                println!("Total Money: {}", format_money(balance));
            }

            Commands::AddExpense {
                category,
                name,
                amount,
            } => {
                ensure_within_cap(&amount)?;
                let result = service.add_expense(category, &name, &amount)?;
                println!(
                    "Added {} expense: {} {}",
                    category,
                    result.entry.name(),
                    format_money(result.entry.amount_cents())
                );
                print_summary(&result.summary);
            }

            Commands::Remove { category } => {
                match service.remove_last_expense(category)? {
                    Some(entry) => println!(
                        "Removed {} expense: {} {}",
                        category,
                        entry.name(),
                        format_money(entry.amount_cents())
                    ),
                    None => println!("No {} expenses to remove.", category),
                }
                print_summary(&service.summary(category));
            }

            Commands::List { category } => {
                let entries = service.list_expenses(category);
                if entries.is_empty() {
                    println!("No {} expenses.", category);
                } else {
                    println!("{} Expenses", category);
                    println!("{}", "-".repeat(30));
                    for entry in entries {
                        println!("{}: {}", entry.name(), format_money(entry.amount_cents()));
                    }
                }
            }

            Commands::Summary { category } => {
                print_summary(&service.summary(category));
            }

            Commands::Check => run_check_command(&service)?,

            Commands::Export {
                format,
                category,
                output,
            } => {
                run_export_command(&service, &format, category, output.as_deref())?;
            }
        }

        Ok(())
    }
}

/// Reject amounts above [`MAX_INPUT_CENTS`]. Unparseable input is left for
/// the service to report.
fn ensure_within_cap(amount: &str) -> Result<(), ValidationError> {
    match parse_amount(amount) {
        Ok(cents) if cents > MAX_INPUT_CENTS => {
            Err(ValidationError::AmountTooLarge(amount.trim().to_string()))
        }
        _ => Ok(()),
    }
}

fn print_summary(summary: &Summary) {
    println!("Total Money: {}", format_money(summary.balance));
    println!("Total Expenses: {}", format_money(summary.total_expenses));
    println!(
        "{} Expenses: {}",
        summary.category,
        format_money(summary.category_total)
    );
}

fn run_check_command(service: &LedgerService) -> Result<()> {
    println!("Checking ledger integrity...\n");

    let report = service.check_integrity();

    println!("Expenses by category:");
    for (category, total) in &report.category_totals {
        println!("  {:<10} {:>14}", format!("{}:", category), format_money(*total));
    }
    println!("  {}", "-".repeat(25));
    println!(
        "  {:<10} {:>14}  {}",
        "Total:",
        format_money(report.recomputed_total),
        if report.tracked_total == report.recomputed_total {
            "OK"
        } else {
            "MISMATCH!"
        }
    );
    println!();

    if report.is_healthy() {
        println!("Ledger is consistent.");
    } else {
        println!("Issues found:");
        for issue in &report.issues {
            println!("  - {}", issue);
        }
        anyhow::bail!("Ledger integrity check failed");
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
}

/// Resolve the export format, rejecting option combinations it cannot honour.
fn parse_export_format(format: &str, category: Option<Category>) -> Result<ExportFormat> {
    match format {
        "csv" => Ok(ExportFormat::Csv),
        "json" if category.is_some() => {
            anyhow::bail!("--category is only supported for csv export")
        }
        "json" => Ok(ExportFormat::Json),
        _ => anyhow::bail!("Unknown format: {}. Valid formats: csv, json", format),
    }
}

fn run_export_command(
    service: &LedgerService,
    format: &str,
    category: Option<Category>,
    output: Option<&str>,
) -> Result<()> {
    // Validate before opening the output so a bad request never truncates it
    let format = parse_export_format(format, category)?;

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create file: {}", path))?,
        ),
        None => Box::new(io::stdout()),
    };

    let exporter = Exporter::new(service.ledger());
    match format {
        ExportFormat::Csv => {
            let count = exporter.export_expenses_csv(writer, category)?;
            eprintln!("Exported {} expenses", count);
        }
        ExportFormat::Json => {
            let count = exporter.export_full_json(writer)?;
            eprintln!("Exported ledger snapshot with {} expenses", count);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_cli_parses_add_expense() {
        let cli = Cli::try_parse_from([
            "expense-tracker",
            "--file",
            "ledger.json",
            "add-expense",
            "weekly",
            "Groceries",
            "40",
        ])
        .unwrap();

        assert_eq!(cli.file, "ledger.json");
        match cli.command {
            Commands::AddExpense {
                category,
                name,
                amount,
            } => {
                assert_eq!(category, Category::Weekly);
                assert_eq!(name, "Groceries");
                assert_eq!(amount, "40");
            }
            _ => panic!("expected add-expense"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["expense-tracker", "list", "daily"]).is_err());
    }

    #[test]
    fn test_summary_defaults_to_single() {
        let cli = Cli::try_parse_from(["expense-tracker", "summary"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Summary {
                category: Category::Single
            }
        ));
    }

    #[test]
    fn test_input_cap() {
        assert!(ensure_within_cap("1000000000").is_ok());
        assert_eq!(
            ensure_within_cap("1000000000.01"),
            Err(ValidationError::AmountTooLarge("1000000000.01".to_string()))
        );
        // Parse errors are reported by the service, not the cap
        assert!(ensure_within_cap("abc").is_ok());
    }

    #[test]
    fn test_export_rejects_category_for_json_before_writing() {
        let temp = tempfile::TempDir::new().unwrap();
        let service = LedgerService::open(temp.path().join("data.json"));
        let out = temp.path().join("out.json");
        fs::write(&out, "keep me").unwrap();

        let result = run_export_command(&service, "json", Some(Category::Weekly), out.to_str());
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

        let fresh = temp.path().join("fresh.csv");
        assert!(run_export_command(&service, "xml", None, fresh.to_str()).is_err());
        assert!(!fresh.exists());
    }

    #[test]
    fn test_parse_export_format() {
        assert_eq!(parse_export_format("csv", None).unwrap(), ExportFormat::Csv);
        assert_eq!(
            parse_export_format("csv", Some(Category::Monthly)).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(parse_export_format("json", None).unwrap(), ExportFormat::Json);
        assert!(parse_export_format("json", Some(Category::Single)).is_err());
    }
}
