use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::open;
use crate::error::Result;
use crate::fmt::money;
use crate::models::{Purchase, Totals};
use crate::reports::{self, MonthReport, TopProduct, WeekReport};
use crate::settings::get_db_path;

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Data-fetching wrappers (used by dispatch)
// ---------------------------------------------------------------------------

pub fn today_summary() -> Result<()> {
    let conn = open(&get_db_path())?;
    let date = today();
    let totals = reports::get_today(&conn, date)?;
    println!("{}", format_today(date, &totals));
    Ok(())
}

pub fn week() -> Result<()> {
    let conn = open(&get_db_path())?;
    let data = reports::get_week(&conn, today())?;
    println!("{}", format_week(&data));
    Ok(())
}

pub fn month() -> Result<()> {
    let conn = open(&get_db_path())?;
    let data = reports::get_month(&conn, today())?;
    println!("{}", format_month(&data));
    Ok(())
}

pub fn top(limit: usize) -> Result<()> {
    let conn = open(&get_db_path())?;
    let rows = reports::get_top_products(&conn, limit)?;
    println!("{}", format_top(limit, &rows));
    Ok(())
}

pub fn search(term: &[String]) -> Result<()> {
    let term = term.join(" ");
    let conn = open(&get_db_path())?;
    let rows = reports::search(&conn, &term)?;
    println!("{}", format_search(&term, &rows));
    Ok(())
}

// ---------------------------------------------------------------------------
// Pure formatting functions (report data -> String)
// ---------------------------------------------------------------------------

pub fn format_today(date: chrono::NaiveDate, totals: &Totals) -> String {
    format!(
        "{}\n{}\n\nTotal spent:       {}\nProducts bought:   {}\nAverage per item:  {}",
        "Today's purchases".bold(),
        date.format("%A, %B %-d, %Y"),
        money(totals.total),
        totals.count,
        money(totals.average()),
    )
}

pub fn format_week(week: &WeekReport) -> String {
    if week.days.is_empty() {
        return "No purchases in the last 7 days.".to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["Day", "Spent", "Products"]);
    for day in &week.days {
        table.add_row(vec![
            Cell::new(day.day.format("%a %b %-d")),
            Cell::new(money(day.totals.total)),
            Cell::new(day.totals.count),
        ]);
    }
    format!(
        "{}\n{table}\nWeekly total:   {}\nDaily average:  {}",
        "Last 7 days".bold(),
        money(week.total),
        money(week.daily_average()),
    )
}

pub fn format_month(month: &MonthReport) -> String {
    format!(
        "{}\n\nTotal spent:        {}\nProducts bought:    {}\nDays with purchases: {}\nDaily average:      {}\nAverage per item:   {}",
        "Last 30 days".bold(),
        money(month.totals.total),
        month.totals.count,
        month.active_days,
        money(month.daily_average()),
        money(month.totals.average()),
    )
}

pub fn format_top(limit: usize, rows: &[TopProduct]) -> String {
    if rows.is_empty() {
        return "No products recorded yet.".to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "Product", "Times", "Total", "Average"]);
    for (i, row) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&row.product),
            Cell::new(row.times),
            Cell::new(money(row.total)),
            Cell::new(money(row.average)),
        ]);
    }
    format!("{}\n{table}", format!("Top {limit} products").bold())
}

pub fn format_search(term: &str, rows: &[Purchase]) -> String {
    if rows.is_empty() {
        return format!("No results for: {term}");
    }
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Product", "Price"]);
    for p in rows {
        table.add_row(vec![
            Cell::new(p.id),
            Cell::new(p.timestamp.get(..10).unwrap_or(&p.timestamp)),
            Cell::new(&p.product),
            Cell::new(money(p.price)),
        ]);
    }
    format!("{} {term}\n{table}", "Results for:".bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::DayTotal;

    fn date(s: &str) -> chrono::NaiveDate {
        chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_format_today() {
        colored::control::set_override(false);
        let text = format_today(date("2025-03-10"), &Totals { total: 66.0, count: 3 });
        assert!(text.contains("Monday, March 10, 2025"));
        assert!(text.contains("$66.00"));
        assert!(text.contains("$22.00"));
    }

    #[test]
    fn test_format_week_empty() {
        let week = WeekReport { days: Vec::new(), total: 0.0 };
        assert_eq!(format_week(&week), "No purchases in the last 7 days.");
    }

    #[test]
    fn test_format_week_rows() {
        colored::control::set_override(false);
        let week = WeekReport {
            days: vec![DayTotal {
                day: date("2025-03-10"),
                totals: Totals { total: 66.0, count: 3 },
            }],
            total: 66.0,
        };
        let text = format_week(&week);
        assert!(text.contains("Mon Mar 10"));
        assert!(text.contains("Weekly total:   $66.00"));
    }

    #[test]
    fn test_format_search_trims_timestamp_to_date() {
        colored::control::set_override(false);
        let rows = vec![Purchase {
            id: 3,
            timestamp: "2025-03-10T09:00:00".to_string(),
            product: "Milk".to_string(),
            price: 28.0,
        }];
        let text = format_search("milk", &rows);
        assert!(text.contains("2025-03-10"));
        assert!(!text.contains("09:00:00"));
        assert_eq!(format_search("tofu", &[]), "No results for: tofu");
    }
}
