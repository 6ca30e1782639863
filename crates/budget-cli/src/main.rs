//! Budget CLI - a terminal host for the budget client.
//!
//! Composes the credential store, gateway and route guard the way the
//! browser shell does: the store is seeded once at start, every command is
//! a navigation checked by the guard, and data commands go through the
//! gateway.

mod navigator;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use budget_core::api::ApiClient;
use budget_core::auth::{CredentialStore, Session};
use budget_core::config::Config;
use budget_core::navigation::NavigationGuard;
use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use navigator::TerminalNavigator;

/// Env var consulted before prompting for a username
const USERNAME_ENV: &str = "BUDGET_USERNAME";

/// Env var consulted before prompting for a password
const PASSWORD_ENV: &str = "BUDGET_PASSWORD";

/// Date format accepted on the command line
const DATE_FORMAT: &str = "%Y-%m-%d";

const USAGE: &str = "\
Usage: budget <command>

Commands:
  login [username]            Log in and store the session token
  logout                      Forget the session token
  status                      Show whether a session is stored
  route <path>                Show where the route guard sends <path>
  expenses                    List expense categories
  investments <start> <end>   List investments between two dates (YYYY-MM-DD)
  transactions [date]         List transactions on a date (default: today)
  summary                     Fetch expenses, this month's investments and today's transactions";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Everything a command needs, wired once at start
struct Client {
    api: ApiClient,
    session: Session,
    guard: NavigationGuard,
    navigator: Arc<TerminalNavigator>,
}

impl Client {
    fn new(config: &Config) -> Result<Self> {
        let credentials = Arc::new(CredentialStore::initialized(config.token_storage()?));
        let navigator = Arc::new(TerminalNavigator::new(config.routes.login.clone()));

        let api = ApiClient::from_config(config, credentials.clone())
            .context("Failed to create API client")?
            .with_navigator(navigator.clone());
        let session = Session::new(api.clone());
        let guard = NavigationGuard::with_routes(credentials, config.routes.clone());

        Ok(Self {
            api,
            session,
            guard,
            navigator,
        })
    }

    /// Run the guard for `route`. Returns false when the navigation was replaced.
    fn visit(&self, route: &str) -> bool {
        let rendered = self.guard.enforce(route, self.navigator.as_ref());
        rendered == route
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprintln!("{}", USAGE);
        return Ok(());
    };

    let config = Config::load()?;
    debug!(base_url = %config.api_base_url, backend = ?config.token_backend, "Config loaded");
    let client = Client::new(&config)?;

    match (command, &args[1..]) {
        ("login", rest) => login(&client, rest.first().cloned()).await,
        ("logout", []) => {
            client.session.logout();
            println!("Logged out.");
            Ok(())
        }
        ("status", []) => {
            if client.session.is_authenticated() {
                println!("Logged in.");
            } else {
                println!("Not logged in.");
            }
            Ok(())
        }
        ("route", [path]) => {
            let decision = client.guard.check(path);
            match decision.target(client.guard.routes()) {
                Some(target) => println!("{} -> {} ({:?})", path, target, decision),
                None => println!("{} -> allowed", path),
            }
            Ok(())
        }
        ("expenses", []) => {
            if !client.visit("/expenses") {
                return Ok(());
            }
            let expenses = client.api.fetch_expense_categories().await?;
            print_json(&expenses)
        }
        ("investments", [start, end]) => {
            let (start, end) = (parse_date(start)?, parse_date(end)?);
            if !client.visit("/investments") {
                return Ok(());
            }
            let investments = client.api.fetch_investments(start, end).await?;
            print_json(&investments)
        }
        ("transactions", rest) if rest.len() <= 1 => {
            let date = match rest.first() {
                Some(d) => parse_date(d)?,
                None => Local::now().date_naive(),
            };
            if !client.visit(&config.routes.landing) {
                return Ok(());
            }
            let transactions = client.api.fetch_transactions(date).await?;
            print_json(&transactions)
        }
        ("summary", []) => summary(&client).await,
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

async fn login(client: &Client, username: Option<String>) -> Result<()> {
    if !client.visit(&client.guard.routes().login) {
        println!("Already logged in. Run `budget logout` first to switch accounts.");
        return Ok(());
    }

    let username = match username.or_else(|| std::env::var(USERNAME_ENV).ok()) {
        Some(u) if !u.is_empty() => u,
        _ => prompt_username()?,
    };
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(p) if !p.is_empty() => p,
        _ => rpassword::prompt_password("Password: ")?,
    };

    if username.is_empty() || password.is_empty() {
        anyhow::bail!("Username and password required");
    }

    client.session.login(&username, &password).await?;
    info!("Session stored");
    println!("Login successful!");
    Ok(())
}

fn prompt_username() -> Result<String> {
    print!("Username: ");
    io::stdout().flush()?;

    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    Ok(username.trim().to_string())
}

/// Fetch the three budget views concurrently
async fn summary(client: &Client) -> Result<()> {
    if !client.visit("/") {
        return Ok(());
    }

    let today = Local::now().date_naive();
    let month_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);

    let (expenses, investments, transactions) = futures::join!(
        client.api.fetch_expense_categories(),
        client.api.fetch_investments(month_start, today),
        client.api.fetch_transactions(today),
    );
    let (expenses, investments, transactions) = (expenses?, investments?, transactions?);

    let planned: f64 = expenses.iter().map(|e| e.planned_value).sum();
    let spent: f64 = transactions.iter().map(|t| t.value).sum();
    let invested: f64 = investments.iter().map(|i| i.balance).sum();

    println!("Expense categories: {} (planned {:.2})", expenses.len(), planned);
    println!("Transactions today: {} (spent {:.2})", transactions.len(), spent);
    println!("Investments this month: {} (balance {:.2})", investments.len(), invested);
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
