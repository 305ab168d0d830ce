use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use sea_orm::Database;

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "ClassMate database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: String,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,
}

fn require_env(key: &str) -> String {
    match std::env::var(key) {
        Ok(v) => v,
        Err(_) => {
            eprintln!("❌ Missing required environment variable: {key}");
            std::process::exit(1);
        }
    }
}

/// Build a Postgres URL from the POSTGRES_* environment variables.
/// Test runs are forced onto a database whose name ends in `_test` so a
/// mistyped env can never point migrations at production data.
fn postgres_url(env: &Env) -> String {
    let host = require_env("POSTGRES_HOST");
    let port = require_env("POSTGRES_PORT");
    let user = require_env("APP_DB_USER");
    let password = require_env("APP_DB_PASSWORD");
    let name = match env {
        Env::Prod => require_env("PROD_DB"),
        Env::Test => {
            let name = require_env("TEST_DB");
            if !name.ends_with("_test") {
                eprintln!("❌ TEST_DB must end with '_test', got: {name}");
                std::process::exit(1);
            }
            name
        }
    };
    format!("postgres://{user}:{password}@{host}:{port}/{name}")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let command = match args.command.as_str() {
        "up" => MigrationCommand::Up,
        "down" => MigrationCommand::Down,
        "fresh" => MigrationCommand::Fresh,
        "reset" => MigrationCommand::Reset,
        "refresh" => MigrationCommand::Refresh,
        "status" => MigrationCommand::Status,
        other => {
            eprintln!(
                "Unknown command: {other}. Use: up | down | fresh | reset | refresh | status"
            );
            std::process::exit(2);
        }
    };

    let url = postgres_url(&args.env);

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
