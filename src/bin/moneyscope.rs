use std::{error::Error, fs::OpenOptions, path::Path, sync::Arc};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use moneyscope::{
    Budget, KeyValueStore, RecordStore, Recurrence, SQLiteStorage, Transaction, TransactionInput,
    dashboard::{BudgetProgress, Charts, Summary, UsageLevel, overall_budget_usage},
    display::{format_currency, format_title, is_single_grapheme},
    filter::{BudgetFilter, TransactionFilter, apply_budget_filters, apply_filters},
};

/// Track transactions and budgets from the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, default_value = "moneyscope.db")]
    db_path: String,

    /// File path to append debug logs to.
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new transaction.
    Add {
        /// Use this ID instead of generating one.
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: TransactionArgs,
    },
    /// Replace the fields of a transaction, keeping its date unless a new one
    /// is given.
    Edit {
        id: String,

        #[command(flatten)]
        fields: TransactionArgs,
    },
    /// Delete a transaction.
    Remove { id: String },
    /// Show every field of a transaction.
    Show { id: String },
    /// Show the transactions that match the given filters.
    List(ListArgs),
    /// Show the dashboard figures.
    Summary,
    /// Manage budgets.
    #[command(subcommand)]
    Budget(BudgetCommand),
}

#[derive(clap::Args, Debug)]
struct TransactionArgs {
    /// The amount earned (positive) or spent (negative).
    #[arg(long, allow_negative_numbers = true)]
    value: f64,

    #[arg(long)]
    category: String,

    #[arg(long)]
    title: Option<String>,

    /// When the transaction happened as an ISO-8601 string.
    #[arg(long)]
    date: Option<String>,

    /// A single emoji.
    #[arg(long, value_parser = parse_emoji)]
    emoji: Option<String>,

    /// A CSS color, e.g. "#6366f1".
    #[arg(long)]
    color: Option<String>,

    /// The label of the budget to file the transaction under.
    #[arg(long)]
    budget: Option<String>,

    /// One of daily, weekly, monthly or yearly.
    #[arg(long)]
    recurrence: Option<Recurrence>,
}

impl TransactionArgs {
    fn into_input(self, id: Option<String>) -> TransactionInput {
        TransactionInput {
            id,
            title: self.title,
            value: self.value,
            category: self.category,
            date: self.date,
            emoji: self.emoji,
            color: self.color,
            budget: self.budget,
            recurrence: self.recurrence,
        }
    }
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Only show transactions whose title contains this text.
    #[arg(long, default_value = "")]
    search: String,

    /// Only show this category, or "all".
    #[arg(long, default_value = "all")]
    category: String,

    /// Only show this budget, or "all".
    #[arg(long, default_value = "all")]
    budget: String,

    /// Only show this recurrence, or "all".
    #[arg(long, default_value = "all")]
    recurrence: String,

    #[arg(long, allow_negative_numbers = true)]
    min_value: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    max_value: Option<f64>,
}

impl From<ListArgs> for TransactionFilter {
    fn from(args: ListArgs) -> Self {
        TransactionFilter {
            search: args.search,
            category: args.category,
            budget: args.budget,
            recurrence: args.recurrence,
            min_value: args.min_value,
            max_value: args.max_value,
        }
    }
}

#[derive(Subcommand, Debug)]
enum BudgetCommand {
    /// Create a spending limit for a category.
    Add {
        /// Use this ID instead of generating one.
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        category: String,

        #[arg(long)]
        limit: f64,
    },
    /// Replace the category and limit of a budget.
    Edit {
        id: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        limit: f64,
    },
    /// Delete a budget. Its transactions are kept.
    Remove { id: String },
    /// Show the progress of a budget and the transactions counted against it.
    Show { id: String },
    /// Show the progress of the budgets that match the given filters.
    List {
        /// Only show budgets whose category contains this text.
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long)]
        min_limit: Option<f64>,

        #[arg(long)]
        max_limit: Option<f64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(args.log_file.as_deref().map(Path::new))?;

    let storage = SQLiteStorage::open(&args.db_path)?;
    let mut store = RecordStore::load(storage);

    match args.command {
        Command::Add { id, fields } => {
            let transaction = store.add_transaction(fields.into_input(id))?;
            println!("Added transaction {}", transaction.id);
        }
        Command::Edit { id, fields } => {
            let transaction = store.update_transaction(&id, fields.into_input(None))?;
            println!("Updated transaction {}", transaction.id);
        }
        Command::Remove { id } => {
            if store.remove_transaction(&id) {
                println!("Removed transaction {id}");
            } else {
                println!("No transaction with ID {id}");
            }
        }
        Command::Show { id } => print!("{}", show_transaction(&store, &id)?),
        Command::List(list_args) => {
            let criteria = TransactionFilter::from(list_args);
            let transactions = apply_filters(store.transactions(), &criteria);
            print_transactions(&transactions);
        }
        Command::Summary => print_summary(store.transactions()),
        Command::Budget(command) => run_budget_command(&mut store, command)?,
    }

    match store.take_persistence_error() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

fn run_budget_command<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    command: BudgetCommand,
) -> Result<(), moneyscope::Error> {
    match command {
        BudgetCommand::Add {
            id,
            category,
            limit,
        } => {
            let mut input = Budget::build(&category, limit);
            input.id = id;
            let budget = store.add_budget(input)?;
            println!("Added budget {}", budget.id);
        }
        BudgetCommand::Edit {
            id,
            category,
            limit,
        } => {
            let budget = store.update_budget(&id, Budget::build(&category, limit))?;
            println!("Updated budget {}", budget.id);
        }
        BudgetCommand::Remove { id } => {
            if store.remove_budget(&id) {
                println!("Removed budget {id}");
            } else {
                println!("No budget with ID {id}");
            }
        }
        BudgetCommand::Show { id } => print!("{}", show_budget(store, &id)?),
        BudgetCommand::List {
            search,
            min_limit,
            max_limit,
        } => {
            let criteria = BudgetFilter {
                search,
                min_limit,
                max_limit,
            };
            let budgets = apply_budget_filters(store.budgets(), &criteria);
            print_budgets(&budgets, store.budgets(), store.transactions());
        }
    }

    Ok(())
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions.");
        return;
    }

    for transaction in transactions {
        println!("{}", transaction_row(transaction));
    }
}

fn transaction_row(transaction: &Transaction) -> String {
    format!(
        "{:<36}  {:<25}  {} {:<32}  {:<16}  {:>14}",
        transaction.id,
        transaction.date,
        transaction.emoji,
        format_title(&transaction.title),
        transaction.category,
        format_currency(transaction.value),
    )
}

fn show_transaction<S: KeyValueStore>(
    store: &RecordStore<S>,
    id: &str,
) -> Result<String, moneyscope::Error> {
    let transaction = store.get_transaction(id)?;

    Ok(format!(
        "ID:          {}\n\
         Title:       {} {}\n\
         Amount:      {}\n\
         Category:    {}\n\
         Date:        {}\n\
         Budget:      {}\n\
         Recurrence:  {}\n\
         Color:       {}\n",
        transaction.id,
        transaction.emoji,
        transaction.title,
        format_currency(transaction.value),
        transaction.category,
        transaction.date,
        transaction.budget.as_deref().unwrap_or("none"),
        transaction
            .recurrence
            .map(|recurrence| recurrence.to_string())
            .unwrap_or_else(|| "none".to_owned()),
        transaction.color,
    ))
}

fn show_budget<S: KeyValueStore>(
    store: &RecordStore<S>,
    id: &str,
) -> Result<String, moneyscope::Error> {
    let budget = store.get_budget(id)?;
    let progress = BudgetProgress::new(budget, store.transactions());

    let mut output = format!(
        "{}: {} of {} ({:.1}%, {})\n",
        budget.category,
        format_currency(progress.spent),
        format_currency(progress.limit),
        progress.percent,
        level_label(progress.level),
    );

    let transactions = store.transactions_for_budget(budget);
    if transactions.is_empty() {
        output.push_str("No transactions.\n");
    }
    for transaction in transactions {
        output.push_str(&transaction_row(transaction));
        output.push('\n');
    }

    Ok(output)
}

fn level_label(level: UsageLevel) -> &'static str {
    match level {
        UsageLevel::OnTrack => "on track",
        UsageLevel::Warning => "warning",
        UsageLevel::Exceeded => "exceeded",
    }
}

fn print_summary(transactions: &[Transaction]) {
    let summary = Summary::from_transactions(transactions);
    let charts = Charts::from_transactions(transactions);

    println!("Total:     {:>14}", format_currency(summary.total));
    println!("Income:    {:>14}", format_currency(summary.income));
    println!("Expenses:  {:>14}", format_currency(summary.expenses));
    println!("Forecast:  {:>14}", format_currency(summary.forecast));

    println!();
    println!("By category:");
    for group in &charts.category_totals {
        println!("  {:<24}  {:>14}", group.key, format_currency(group.total));
    }

    if !charts.budget_totals.is_empty() {
        println!();
        println!("By budget:");
        for group in &charts.budget_totals {
            println!("  {:<24}  {:>14}", group.key, format_currency(group.total));
        }
    }

    println!();
    println!("Largest transactions:");
    for transaction in &charts.top_transactions {
        println!(
            "  {} {:<32}  {:>14}",
            transaction.emoji,
            format_title(&transaction.title),
            format_currency(transaction.value)
        );
    }

    println!();
    println!("Balance (rolling average):");
    for ((label, balance), average) in charts
        .labels
        .iter()
        .zip(&charts.balance)
        .zip(&charts.rolling_average)
    {
        println!(
            "  {:<32}  {:>14}  ({})",
            format_title(label),
            format_currency(*balance),
            format_currency(*average)
        );
    }
}

fn print_budgets(shown: &[Budget], all: &[Budget], transactions: &[Transaction]) {
    for budget in shown {
        let progress = BudgetProgress::new(budget, transactions);
        let level = level_label(progress.level);

        println!(
            "{:<36}  {:<24}  {:>14} of {:>14}  {:>5.1}%  {level}",
            progress.budget_id,
            progress.category,
            format_currency(progress.spent),
            format_currency(progress.limit),
            progress.percent,
        );
    }

    let usage = overall_budget_usage(all, transactions);
    println!(
        "Overall: {} of {} ({:.1}%)",
        format_currency(usage.spent),
        format_currency(usage.limit),
        usage.percent
    );
}

fn parse_emoji(text: &str) -> Result<String, String> {
    if is_single_grapheme(text) {
        Ok(text.to_owned())
    } else {
        Err(format!("{text:?} must be a single emoji"))
    }
}

/// Logs INFO and above to stderr (overridable with `RUST_LOG`) and, if
/// `log_file` is given, DEBUG and above to that file.
fn setup_logging(log_file: Option<&Path>) -> Result<(), std::io::Error> {
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let debug_log = match log_file {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(Arc::new(log_file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .init();

    Ok(())
}
