use std::path::PathBuf;

use crate::db::open;
use crate::error::Result;
use crate::reports::{get_recent, write_csv, EXPORT_LIMIT};
use crate::settings::load_settings;

fn default_path(data_dir: &str) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    PathBuf::from(data_dir)
        .join("exports")
        .join(format!("purchases-{date}.csv"))
}

pub fn run(output: Option<String>) -> Result<()> {
    let settings = load_settings();
    let conn = open(&settings.db_path())?;
    let purchases = get_recent(&conn, EXPORT_LIMIT)?;
    if purchases.is_empty() {
        println!("No purchases to export.");
        return Ok(());
    }

    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path(&settings.data_dir));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(&path)?;
    write_csv(&purchases, file)?;

    println!("Wrote {} purchase(s) to {}", purchases.len(), path.display());
    Ok(())
}
