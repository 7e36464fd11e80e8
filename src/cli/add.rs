use std::io::Read;

use colored::Colorize;

use crate::db::open;
use crate::error::Result;
use crate::fmt::money;
use crate::ingest::{ingest_message, BatchReport, Ingestion, Report};
use crate::settings::get_db_path;

pub fn run(text: Vec<String>) -> Result<()> {
    let message = if text.is_empty() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        text.join(" ")
    };

    let conn = open(&get_db_path())?;
    let now = chrono::Local::now().naive_local();

    match ingest_message(&conn, &message, now)? {
        Ingestion::Empty => println!("Nothing to log."),
        Ingestion::Single(report) => println!("{}", format_report(&report)),
        Ingestion::Batch(report) => println!("{}", format_batch(&report)),
    }
    Ok(())
}

fn checked_off_line(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(format!("Checked off the list: {}", items.join(", ")))
    }
}

pub fn format_report(report: &Report) -> String {
    let mut lines = vec![
        format!(
            "{} {} x {}",
            "Added:".green().bold(),
            report.quantity,
            report.product
        ),
        format!(
            "(each {}, total {})",
            money(report.unit_price),
            money(report.line_total)
        ),
        String::new(),
        "Today:".bold().to_string(),
        format!("  Total:    {}", money(report.today.total)),
        format!("  Products: {}", report.today.count),
    ];
    if let Some(line) = checked_off_line(&report.checked_off) {
        lines.push(line);
    }
    if let Some(id) = report.purchase_id {
        lines.push(format!("Purchase ID {id} (undo with `grocer delete {id}`)"));
    }
    lines.join("\n")
}

pub fn format_batch(report: &BatchReport) -> String {
    let mut lines = vec![
        "--- Import summary ---".bold().to_string(),
        format!("{} {}", "Items saved:".green().bold(), report.saved),
        format!("{} {}", "Total added:".bold(), money(report.total_spent)),
    ];
    if report.store_failures > 0 {
        lines.push(format!(
            "{} {} item(s) could not be saved",
            "Warning:".red().bold(),
            report.store_failures
        ));
    }
    if let Some(line) = checked_off_line(&report.checked_off) {
        lines.push(line);
    }
    if !report.failed.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "{} {} line(s):",
            "Could not understand".yellow().bold(),
            report.failed.len()
        ));
        for failed in &report.failed {
            lines.push(format!("  - `{}` ({})", failed.line, failed.error));
        }
    }
    lines.join("\n")
}
