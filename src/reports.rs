use std::io::Write;

use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{Purchase, Totals};
use crate::store::{self, format_date, purchase_from_row};

pub const SEARCH_LIMIT: usize = 20;
pub const EXPORT_LIMIT: usize = 100;

/// Inclusive window of `days` calendar days ending on `today`.
fn window(today: NaiveDate, days: i64) -> (String, String) {
    let from = today - Duration::days(days - 1);
    (format_date(from), format_date(today))
}

// ---------------------------------------------------------------------------
// Today
// ---------------------------------------------------------------------------

pub fn get_today(conn: &Connection, today: NaiveDate) -> Result<Totals> {
    store::day_summary(conn, today)
}

// ---------------------------------------------------------------------------
// Week
// ---------------------------------------------------------------------------

pub struct DayTotal {
    pub day: NaiveDate,
    pub totals: Totals,
}

pub struct WeekReport {
    /// Days with at least one purchase, newest first.
    pub days: Vec<DayTotal>,
    pub total: f64,
}

impl WeekReport {
    /// Average over the days that had purchases.
    pub fn daily_average(&self) -> f64 {
        if self.days.is_empty() {
            0.0
        } else {
            self.total / self.days.len() as f64
        }
    }
}

pub fn get_week(conn: &Connection, today: NaiveDate) -> Result<WeekReport> {
    let (from, to) = window(today, 7);
    let mut stmt = conn.prepare(
        "SELECT date(timestamp) AS day, SUM(price), COUNT(*) FROM purchases \
         WHERE date(timestamp) BETWEEN ?1 AND ?2 \
         GROUP BY day ORDER BY day DESC",
    )?;
    let rows = stmt.query_map(params![from, to], |row| {
        Ok((
            row.get::<_, String>(0)?,
            Totals {
                total: row.get(1)?,
                count: row.get(2)?,
            },
        ))
    })?;

    let mut days = Vec::new();
    for row in rows {
        let (day, totals) = row?;
        if let Ok(day) = NaiveDate::parse_from_str(&day, store::DATE_FORMAT) {
            days.push(DayTotal { day, totals });
        }
    }
    let total = days.iter().map(|d| d.totals.total).sum();
    Ok(WeekReport { days, total })
}

// ---------------------------------------------------------------------------
// Month
// ---------------------------------------------------------------------------

pub struct MonthReport {
    pub totals: Totals,
    /// Distinct days with purchases.
    pub active_days: i64,
}

impl MonthReport {
    pub fn daily_average(&self) -> f64 {
        if self.active_days > 0 {
            self.totals.total / self.active_days as f64
        } else {
            0.0
        }
    }
}

pub fn get_month(conn: &Connection, today: NaiveDate) -> Result<MonthReport> {
    let (from, to) = window(today, 30);
    let report = conn.query_row(
        "SELECT COALESCE(SUM(price), 0), COUNT(*), COUNT(DISTINCT date(timestamp)) FROM purchases \
         WHERE date(timestamp) BETWEEN ?1 AND ?2",
        params![from, to],
        |row| {
            Ok(MonthReport {
                totals: Totals {
                    total: row.get(0)?,
                    count: row.get(1)?,
                },
                active_days: row.get(2)?,
            })
        },
    )?;
    Ok(report)
}

// ---------------------------------------------------------------------------
// Top products
// ---------------------------------------------------------------------------

pub struct TopProduct {
    pub product: String,
    pub times: i64,
    pub total: f64,
    pub average: f64,
}

/// Most frequently bought products, grouping names case-insensitively.
pub fn get_top_products(conn: &Connection, limit: usize) -> Result<Vec<TopProduct>> {
    let mut stmt = conn.prepare(
        "SELECT product, COUNT(*) AS times, SUM(price) AS total, AVG(price) FROM purchases \
         GROUP BY lower(product) ORDER BY times DESC, total DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit as i64], |row| {
        Ok(TopProduct {
            product: row.get(0)?,
            times: row.get(1)?,
            total: row.get(2)?,
            average: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Search / export
// ---------------------------------------------------------------------------

/// Most recent purchases whose product contains `term`, ignoring case the
/// same way shopping-list check-off does.
pub fn search(conn: &Connection, term: &str) -> Result<Vec<Purchase>> {
    let term = term.trim();
    let mut stmt = conn.prepare(
        "SELECT id, timestamp, product, price FROM purchases \
         ORDER BY timestamp DESC, id DESC",
    )?;
    let mut hits = Vec::new();
    for row in stmt.query_map([], purchase_from_row)? {
        let purchase = row?;
        if store::contains_ignore_case(&purchase.product, term) {
            hits.push(purchase);
            if hits.len() == SEARCH_LIMIT {
                break;
            }
        }
    }
    Ok(hits)
}

pub fn get_recent(conn: &Connection, limit: usize) -> Result<Vec<Purchase>> {
    let mut stmt = conn.prepare(
        "SELECT id, timestamp, product, price FROM purchases \
         ORDER BY timestamp DESC, id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit as i64], purchase_from_row)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn write_csv<W: Write>(purchases: &[Purchase], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["Timestamp", "Product", "Price"])?;
    for p in purchases {
        let price = p.price.to_string();
        writer.write_record([p.timestamp.as_str(), p.product.as_str(), price.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;
    use crate::store::insert_purchase;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn seed_purchases(conn: &Connection) {
        let rows = [
            ("2025-03-10T09:00:00", "Milk", 28.0),
            ("2025-03-10T09:00:00", "Milk", 28.0),
            ("2025-03-10T19:00:00", "Bread", 10.0),
            ("2025-03-08T12:00:00", "milk", 30.0),
            ("2025-03-04T12:00:00", "Eggs", 50.0),
            ("2025-03-03T12:00:00", "Rice", 20.0),
            ("2025-02-01T12:00:00", "Coffee", 120.0),
            ("2025-01-01T12:00:00", "Coffee", 110.0),
        ];
        for (ts, product, price) in rows {
            insert_purchase(conn, ts, product, price).unwrap();
        }
    }

    #[test]
    fn test_today() {
        let (_dir, conn) = test_db();
        seed_purchases(&conn);
        let totals = get_today(&conn, date("2025-03-10")).unwrap();
        assert_eq!(totals.total, 66.0);
        assert_eq!(totals.count, 3);
        assert_eq!(totals.average(), 22.0);
    }

    #[test]
    fn test_week_covers_seven_calendar_days() {
        let (_dir, conn) = test_db();
        seed_purchases(&conn);
        let week = get_week(&conn, date("2025-03-10")).unwrap();
        let days: Vec<NaiveDate> = week.days.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![date("2025-03-10"), date("2025-03-08"), date("2025-03-04")]);
        assert_eq!(week.total, 146.0);
        assert_eq!(week.days[0].totals.count, 3);
        assert!((week.daily_average() - 146.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_week_empty() {
        let (_dir, conn) = test_db();
        let week = get_week(&conn, date("2025-03-10")).unwrap();
        assert!(week.days.is_empty());
        assert_eq!(week.daily_average(), 0.0);
    }

    #[test]
    fn test_month_covers_thirty_days() {
        let (_dir, conn) = test_db();
        seed_purchases(&conn);
        let month = get_month(&conn, date("2025-03-10")).unwrap();
        // 2025-02-09 .. 2025-03-10: the February coffee falls outside.
        assert_eq!(month.totals.count, 6);
        assert_eq!(month.totals.total, 166.0);
        assert_eq!(month.active_days, 4);
        assert_eq!(month.daily_average(), 41.5);
    }

    #[test]
    fn test_top_products_groups_case_insensitively() {
        let (_dir, conn) = test_db();
        seed_purchases(&conn);
        let top = get_top_products(&conn, 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product.to_lowercase(), "milk");
        assert_eq!(top[0].times, 3);
        assert_eq!(top[0].total, 86.0);
        assert_eq!(top[1].product, "Coffee");
        assert_eq!(top[1].average, 115.0);
    }

    #[test]
    fn test_search_matches_substring_newest_first() {
        let (_dir, conn) = test_db();
        seed_purchases(&conn);
        let hits = search(&conn, "MIL").unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].timestamp, "2025-03-10T09:00:00");
        assert_eq!(hits[2].product, "milk");
        assert!(search(&conn, "tofu").unwrap().is_empty());
    }

    #[test]
    fn test_search_folds_non_ascii_case() {
        let (_dir, conn) = test_db();
        insert_purchase(&conn, "2025-03-10T09:00:00", "CAFÉ MOLIDO", 95.0).unwrap();
        insert_purchase(&conn, "2025-03-10T10:00:00", "Cafetera", 300.0).unwrap();
        let hits = search(&conn, "café").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].product, "CAFÉ MOLIDO");
    }

    #[test]
    fn test_search_is_capped() {
        let (_dir, conn) = test_db();
        for _ in 0..30 {
            insert_purchase(&conn, "2025-03-10T09:00:00", "Milk", 28.0).unwrap();
        }
        assert_eq!(search(&conn, "milk").unwrap().len(), SEARCH_LIMIT);
    }

    #[test]
    fn test_write_csv_quotes_products() {
        let (_dir, conn) = test_db();
        insert_purchase(&conn, "2025-03-10T09:00:00", "Tomato Sauce, large", 15.5).unwrap();
        insert_purchase(&conn, "2025-03-10T10:00:00", "Milk", 28.0).unwrap();
        let recent = get_recent(&conn, EXPORT_LIMIT).unwrap();
        let mut out = Vec::new();
        write_csv(&recent, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Timestamp,Product,Price\n\
             2025-03-10T10:00:00,Milk,28\n\
             2025-03-10T09:00:00,\"Tomato Sauce, large\",15.5\n"
        );
    }
}
