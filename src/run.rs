use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::engine::TREND_WINDOW_DAYS;
use crate::export;
use crate::format::{format_currency, format_date, truncate};
use crate::models::{InvalidInput, Transaction};
use crate::store::{BalanceStore, SqliteStore, TransactionStore};
use crate::view::DashboardView;

const DEFAULT_USER: &str = "default";

pub(crate) fn as_cli(args: &[String], store: &SqliteStore) -> Result<()> {
    if args.len() < 2 {
        return cmd_summary(&[], store);
    }
    match args[1].as_str() {
        "add" => cmd_add(&args[2..], store),
        "list" | "ls" => cmd_list(&args[2..], store),
        "summary" | "s" => cmd_summary(&args[2..], store),
        "export" => cmd_export(&args[2..], store),
        "balance" => cmd_balance(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledgerlite {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("LedgerLite — local-first personal finance tracker");
    println!();
    println!("Usage: ledgerlite [command]");
    println!();
    println!("Commands:");
    println!("  (none), summary, s            Show the dashboard");
    println!("  add <amount>                  Record a transaction (negative = expense)");
    println!("    --category <name>           Category label (default: none)");
    println!("    --note <text>               Free-text note");
    println!("    --date <YYYY-MM-DD>         Transaction date (default: today)");
    println!("  list                          List transactions, newest first");
    println!("    --filter all|income|expense");
    println!("  export [path]                 Export transactions to CSV");
    println!("    --filter all|income|expense");
    println!("  balance [<amount>]            Show or set the initial balance");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("All commands accept --user <id> (default: \"{DEFAULT_USER}\")");
}

// ── Commands ─────────────────────────────────────────────────

fn cmd_add(args: &[String], store: &SqliteStore) -> Result<()> {
    let Some(raw_amount) = args.first().filter(|a| !a.starts_with("--")) else {
        anyhow::bail!(
            "Usage: ledgerlite add <amount> [--category <c>] [--note <n>] [--date <YYYY-MM-DD>]"
        );
    };

    let amount = parse_signed_amount(raw_amount)?;
    let date = match flag_value(args, "--date") {
        Some(raw) => parse_date_input(raw)?,
        None => Local::now().date_naive(),
    };
    let category = flag_value(args, "--category")
        .map(|s| s.to_string())
        .filter(|s| !s.trim().is_empty());
    let note = flag_value(args, "--note").unwrap_or_default().to_string();
    let user_id = user_arg(args);

    let txn = Transaction::new(user_id.clone(), amount, category, note, date);
    let persisted = store.create(&txn)?;

    let kind = if persisted.is_income() { "income" } else { "expense" };
    println!(
        "Added {kind} of {} on {} ({})",
        format_currency(persisted.abs_amount()),
        format_date(persisted.date),
        persisted.category_label(),
    );

    // Recompute the view model after the mutation so the new balance shows.
    let view = DashboardView::load(store, &user_id, Local::now().date_naive())?;
    println!("Balance: {}", format_currency(view.result.balance));
    Ok(())
}

fn cmd_list(args: &[String], store: &SqliteStore) -> Result<()> {
    let user_id = user_arg(args);
    let filter = filter_arg(args)?;
    let transactions = store.list(&user_id)?;
    let filtered: Vec<&Transaction> = transactions.iter().filter(|t| filter.matches(t)).collect();

    if filtered.is_empty() {
        println!("No transactions found");
        return Ok(());
    }

    println!("{:<14} {:<18} {:<26} Amount", "Date", "Category", "Note");
    println!("{}", "─".repeat(72));
    for txn in filtered {
        let sign = if txn.is_income() { "+" } else { "-" };
        println!(
            "{:<14} {:<18} {:<26} {sign}{}",
            format_date(txn.date),
            truncate(txn.category_label(), 18),
            truncate(&txn.note, 26),
            format_currency(txn.abs_amount()),
        );
    }
    Ok(())
}

fn cmd_summary(args: &[String], store: &SqliteStore) -> Result<()> {
    let user_id = user_arg(args);
    let today = Local::now().date_naive();
    let view = DashboardView::load(store, &user_id, today)?;

    println!("LedgerLite — {}", today.format("%B %Y"));
    println!("{}", "─".repeat(44));
    if view.needs_initial_balance() {
        println!("  No initial balance set (treated as zero).");
        println!("  Run: ledgerlite balance <amount>");
        println!();
    }
    println!("  Balance:    {}", format_currency(view.result.balance));
    if let Some(initial) = view.initial_balance {
        println!("  Initial:    {}", format_currency(initial));
    }
    println!("  Income:     {}", format_currency(view.result.total_income));
    println!("  Expenses:   {}", format_currency(view.result.total_expenses));
    println!("  Total Txns: {}", view.transactions.len());

    if !view.result.category_breakdown.is_empty() {
        println!();
        println!("Expenses by Category:");
        for (name, amount) in &view.result.category_breakdown {
            println!("  {:<24} {}", truncate(name, 24), format_currency(*amount));
        }
    }

    if !view.result.trend.is_empty() {
        println!();
        println!("Income vs Expenses (last {TREND_WINDOW_DAYS} days):");
        for point in &view.result.trend {
            println!(
                "  {:<8} +{:<14} -{}",
                point.label,
                format_currency(point.income),
                format_currency(point.expenses),
            );
        }
    }
    Ok(())
}

fn cmd_export(args: &[String], store: &SqliteStore) -> Result<()> {
    let user_id = user_arg(args);
    let filter = filter_arg(args)?;
    let transactions = store.list(&user_id)?;
    let filtered: Vec<Transaction> = transactions
        .into_iter()
        .filter(|t| filter.matches(t))
        .collect();

    let today = Local::now().date_naive();
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a, &home))
        .unwrap_or_else(|| {
            format!("{home}/ledgerlite-export-{}.csv", today.format("%Y-%m-%d"))
        });

    let count = export::export_to_path(Path::new(&output_path), &filtered)?;
    if count == 0 {
        println!("No transactions to export (header written to {output_path})");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

fn cmd_balance(args: &[String], store: &SqliteStore) -> Result<()> {
    let user_id = user_arg(args);
    match args.first().filter(|a| !a.starts_with("--")) {
        Some(raw) => {
            let amount = parse_initial_balance(raw)?;
            store.set_initial_balance(&user_id, amount)?;
            println!("Initial balance set to {}", format_currency(amount));
            let view = DashboardView::load(store, &user_id, Local::now().date_naive())?;
            println!("Balance: {}", format_currency(view.result.balance));
        }
        None => match store.initial_balance(&user_id)? {
            Some(amount) => println!("Initial balance: {}", format_currency(amount)),
            None => println!("No initial balance set. Run: ledgerlite balance <amount>"),
        },
    }
    Ok(())
}

// ── Input validation ─────────────────────────────────────────
// Validation happens here, at the form boundary; the engine and the store
// only ever see well-formed values.

/// Signed transaction amount from the command line. Zero is rejected up
/// front so the engine never has to classify it.
pub(crate) fn parse_signed_amount(raw: &str) -> Result<Decimal, InvalidInput> {
    match Decimal::from_str(raw.trim()) {
        Ok(amount) if !amount.is_zero() => Ok(amount),
        _ => Err(InvalidInput::Amount(raw.to_string())),
    }
}

pub(crate) fn parse_date_input(raw: &str) -> Result<NaiveDate, InvalidInput> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| InvalidInput::Date(raw.to_string()))
}

/// Initial balances are entered non-negative; the computed running balance
/// may still go below zero once expenses apply.
pub(crate) fn parse_initial_balance(raw: &str) -> Result<Decimal, InvalidInput> {
    match Decimal::from_str(raw.trim()) {
        Ok(amount) if amount >= Decimal::ZERO => Ok(amount),
        _ => Err(InvalidInput::Balance(raw.to_string())),
    }
}

// ── Argument helpers ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxnFilter {
    All,
    Income,
    Expense,
}

impl TxnFilter {
    fn matches(self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.is_income(),
            Self::Expense => txn.is_expense(),
        }
    }
}

fn filter_arg(args: &[String]) -> Result<TxnFilter> {
    match flag_value(args, "--filter") {
        None | Some("all") => Ok(TxnFilter::All),
        Some("income") => Ok(TxnFilter::Income),
        Some("expense") | Some("expenses") => Ok(TxnFilter::Expense),
        Some(other) => anyhow::bail!("Unknown filter: {other} (expected all, income or expense)"),
    }
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn user_arg(args: &[String]) -> String {
    flag_value(args, "--user").unwrap_or(DEFAULT_USER).to_string()
}

fn shellexpand(path: &str, home: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
