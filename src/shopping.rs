use rusqlite::Connection;

use crate::error::Result;
use crate::store;

/// `"mILK"` -> `"Milk"`: first character uppercased, the rest lowercased.
pub fn normalize_item(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub struct AddResult {
    pub requested: usize,
    pub added: usize,
}

/// Add every whitespace-separated word of `text` as its own list entry.
pub fn add_items(conn: &Connection, text: &str) -> Result<AddResult> {
    let items: Vec<String> = text.split_whitespace().map(normalize_item).collect();
    let mut added = 0usize;
    for item in &items {
        if store::add_list_item(conn, item)? {
            added += 1;
        }
    }
    Ok(AddResult {
        requested: items.len(),
        added,
    })
}

/// Cross off list entries contained in `purchased`. Never fails: store
/// errors are logged and nothing is reported as removed.
pub fn check_off(conn: &Connection, purchased: &str) -> Vec<String> {
    match store::remove_matching_items(conn, purchased) {
        Ok(removed) => {
            if !removed.is_empty() {
                tracing::debug!(purchased, ?removed, "checked off shopping list");
            }
            removed
        }
        Err(e) => {
            tracing::warn!(purchased, error = %e, "failed to check off shopping list");
            Vec::new()
        }
    }
}
