pub mod access;
pub mod add;
pub mod delete;
pub mod export;
pub mod init;
pub mod list;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::{GrocerError, Result};
use crate::gate::admit;
use crate::settings::load_settings;

/// Reject the request unless `user` passes the configured allow-list.
pub(crate) fn authorize(user: Option<&str>) -> Result<()> {
    let settings = load_settings();
    if admit(&settings.allowed_users, user) {
        Ok(())
    } else {
        Err(GrocerError::Denied(user.unwrap_or("(none)").to_string()))
    }
}

#[derive(Parser)]
#[command(name = "grocer", about = "Log grocery purchases from plain text and keep a shopping list.")]
pub struct Cli {
    /// Requester id checked against the allow-list
    #[arg(long, global = true, env = "GROCER_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for grocer data (default: ~/Documents/grocer)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Log purchases: `Milk 28`, `3 Milk 28`. Reads stdin when no text is given;
    /// every non-empty stdin line is one purchase.
    Add {
        /// Purchase text, e.g. 3 Tomato Sauce 15.50
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Manage the shopping list.
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Total spent today.
    Today,
    /// Per-day spending for the last 7 days.
    Week,
    /// Spending summary for the last 30 days.
    Month,
    /// Most frequently bought products.
    Top {
        /// Number of products to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Find purchases by product name.
    Search {
        /// Text to look for
        #[arg(required = true)]
        term: Vec<String>,
    },
    /// Export recent purchases to CSV.
    Export {
        /// Output path (default: <data_dir>/exports/purchases-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Delete one purchase by ID (undo).
    Delete {
        /// Purchase ID, as printed when it was logged
        id: i64,
    },
    /// Allow a requester id.
    Allow {
        id: String,
    },
    /// Remove a requester id from the allow-list.
    Deny {
        id: String,
    },
    /// Show data location and summary counts.
    Status,
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Add items to the shopping list (one word per item).
    Add {
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Show what is still missing.
    Show,
    /// Remove every item from the list.
    Clear,
}
