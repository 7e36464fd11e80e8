use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::models::{Purchase, ShoppingItem, Totals};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Purchases
// ---------------------------------------------------------------------------

pub fn insert_purchase(conn: &Connection, timestamp: &str, product: &str, price: f64) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO purchases (timestamp, product, price) VALUES (?1, ?2, ?3)",
    )?;
    stmt.execute(params![timestamp, product, price])?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_purchase(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM purchases WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

pub fn get_purchase(conn: &Connection, id: i64) -> Result<Option<Purchase>> {
    let purchase = conn
        .query_row(
            "SELECT id, timestamp, product, price FROM purchases WHERE id = ?1",
            [id],
            purchase_from_row,
        )
        .optional()?;
    Ok(purchase)
}

pub(crate) fn purchase_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Purchase> {
    Ok(Purchase {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        product: row.get(2)?,
        price: row.get(3)?,
    })
}

/// Sum and count of every purchase whose timestamp falls on `date`.
pub fn day_summary(conn: &Connection, date: NaiveDate) -> Result<Totals> {
    let totals = conn.query_row(
        "SELECT COALESCE(SUM(price), 0), COUNT(*) FROM purchases WHERE date(timestamp) = ?1",
        [format_date(date)],
        |row| {
            Ok(Totals {
                total: row.get(0)?,
                count: row.get(1)?,
            })
        },
    )?;
    Ok(totals)
}

// ---------------------------------------------------------------------------
// Shopping list
// ---------------------------------------------------------------------------

/// Insert-or-ignore; returns whether a new entry was created.
pub fn add_list_item(conn: &Connection, product: &str) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO shopping_list (product) VALUES (?1)",
        [product],
    )?;
    Ok(changed > 0)
}

pub fn list_items(conn: &Connection) -> Result<Vec<ShoppingItem>> {
    let mut stmt = conn.prepare("SELECT id, product FROM shopping_list ORDER BY product ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(ShoppingItem {
            id: row.get(0)?,
            product: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn clear_list(conn: &Connection) -> Result<usize> {
    Ok(conn.execute("DELETE FROM shopping_list", [])?)
}

/// Delete every list entry whose name, ignoring case, appears inside
/// `purchased`. Returns the names that were removed.
/// Case-insensitive substring test using Unicode lowercasing, so `CAFÉ`
/// matches `café`. SQLite's `lower()` only folds ASCII.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn remove_matching_items(conn: &Connection, purchased: &str) -> Result<Vec<String>> {
    let matched: Vec<ShoppingItem> = list_items(conn)?
        .into_iter()
        .filter(|item| !item.product.is_empty() && contains_ignore_case(purchased, &item.product))
        .collect();

    let mut removed = Vec::with_capacity(matched.len());
    for item in matched {
        conn.execute("DELETE FROM shopping_list WHERE id = ?1", [item.id])?;
        removed.push(item.product);
    }
    Ok(removed)
}
