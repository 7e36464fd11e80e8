mod cli;
mod db;
mod error;
mod fmt;
mod gate;
mod ingest;
mod models;
mod parser;
mod reports;
mod settings;
mod shopping;
mod store;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ListCommands};

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    setup_tracing();
    let cli = Cli::parse();

    let result = cli::authorize(cli.user.as_deref()).and_then(|()| match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Add { text } => cli::add::run(text),
        Commands::List { command } => match command {
            ListCommands::Add { items } => cli::list::add(&items),
            ListCommands::Show => cli::list::show(),
            ListCommands::Clear => cli::list::clear(),
        },
        Commands::Today => cli::report::today_summary(),
        Commands::Week => cli::report::week(),
        Commands::Month => cli::report::month(),
        Commands::Top { limit } => cli::report::top(limit),
        Commands::Search { term } => cli::report::search(&term),
        Commands::Export { output } => cli::export::run(output),
        Commands::Delete { id } => cli::delete::run(id),
        Commands::Allow { id } => cli::access::allow(&id),
        Commands::Deny { id } => cli::access::deny(&id),
        Commands::Status => cli::status::run(),
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
