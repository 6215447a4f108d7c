use clap::{Parser, Subcommand};
use engine::{Currency, Expense, compute_balances, derive_all_debts, sort_newest_first};

use crate::{error::AppError, household::Snapshot, settings::Settings};

mod error;
mod household;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "roomie")]
#[command(about = "Split shared expenses and settle up between roommates")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, env = "ROOMIE_CONFIG")]
    config: Option<String>,
    /// Override the expenses file (JSON).
    #[arg(long)]
    expenses: Option<String>,
    /// Override the display currency.
    #[arg(long, value_parser = parse_currency)]
    currency: Option<Currency>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Who owes whom, after netting every expense.
    Balances {
        #[arg(long)]
        json: bool,
    },
    /// Debts implied by each expense, before netting.
    Debts,
    /// Expenses, most recent first.
    List,
    /// One expense with its per-roommate shares.
    Show { id: String },
    /// Validate the expenses file.
    Check,
}

fn parse_currency(raw: &str) -> Result<Currency, String> {
    Currency::try_from(raw).map_err(|err| err.to_string())
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::new(cli.config.as_deref())?;
    if let Some(expenses) = cli.expenses {
        settings.household.expenses = expenses;
    }
    if let Some(currency) = cli.currency {
        settings.household.currency = currency;
    }
    if let Some(level) = cli.level {
        settings.app.level = level;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "roomie={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let currency = settings.household.currency;
    let snapshot = Snapshot::load(&settings.household.expenses)?;
    tracing::info!(
        "loaded {} expense(s) from {}",
        snapshot.expenses.len(),
        settings.household.expenses
    );

    match cli.command {
        Command::Balances { json } => {
            let balances = compute_balances(&snapshot.expenses);
            if json {
                println!("{}", serde_json::to_string_pretty(&balances)?);
            } else if balances.is_empty() {
                println!("All settled up! No balances to display.");
            } else {
                for balance in &balances {
                    println!("{}", balance.describe(currency));
                }
            }
        }
        Command::Debts => {
            for debt in derive_all_debts(&snapshot.expenses) {
                println!(
                    "{} owes {} {} ({})",
                    debt.debtor,
                    debt.creditor,
                    currency.format(debt.amount),
                    debt.expense_id
                );
            }
        }
        Command::List => {
            let mut expenses = snapshot.expenses.clone();
            sort_newest_first(&mut expenses);
            for expense in &expenses {
                println!(
                    "{}  {:<24} {:>12}  {}",
                    expense.date.format("%Y-%m-%d"),
                    expense.title,
                    currency.format(expense.cost),
                    expense.paid_by
                );
            }
        }
        Command::Show { id } => {
            let expense = snapshot
                .expense(&id)
                .ok_or_else(|| AppError::UnknownExpense(id.clone()))?;
            print_detail(expense, currency);
        }
        Command::Check => {
            for rejected in &snapshot.rejected {
                println!(
                    "#{} {:?}: {}",
                    rejected.index, rejected.title, rejected.error
                );
            }
            if !snapshot.rejected.is_empty() {
                return Err(AppError::Rejected(snapshot.rejected.len()));
            }
            println!("{} expense(s) ok", snapshot.expenses.len());
        }
    }

    Ok(())
}

fn print_detail(expense: &Expense, currency: Currency) {
    println!("{}", expense.title);
    println!("  amount   {}", currency.format(expense.cost));
    println!("  paid by  {}", expense.paid_by);
    println!("  date     {}", expense.date.format("%Y-%m-%d %H:%M"));
    println!(
        "  split    {}",
        expense.split.map_or("unknown", |split| split.as_str())
    );
    for (participant, share) in expense.shares() {
        println!("    {participant:<16} {}", currency.format(share));
    }
}
