pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "clientela",
    about = "Clientela customer-management CLI",
    long_about = "Manage customer records: add, look up, list, update, and delete entries \
                  backed by the configured database.",
    after_help = "Examples:\n  clientela migrate\n  clientela add --name \"Ana Gómez\" --email ana@example.com\n  clientela list"
)]
pub struct Cli {
    /// Path to the properties file with database and logging settings.
    #[arg(long, global = true, default_value = "clientela.properties")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Validate and insert a new customer; prints the assigned id")]
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    #[command(about = "Look up one customer by id")]
    Get { id: String },
    #[command(about = "List every stored customer")]
    List,
    #[command(about = "Validate and overwrite an existing customer")]
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    #[command(about = "Delete a customer by id (a missing id is a no-op)")]
    Delete { id: String },
    #[command(about = "Apply pending database migrations")]
    Migrate,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Add { name, email, phone } => commands::add::run(&cli.config, name, email, phone),
        Command::Get { id } => commands::get::run(&cli.config, id),
        Command::List => commands::list::run(&cli.config),
        Command::Update { id, name, email, phone } => {
            commands::update::run(&cli.config, id, name, email, phone)
        }
        Command::Delete { id } => commands::delete::run(&cli.config, id),
        Command::Migrate => commands::migrate::run(&cli.config),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
