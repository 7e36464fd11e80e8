use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::error::{GrocerError, ParseError, Result};
use crate::models::{ParsedLine, Totals};
use crate::parser::parse_line;
use crate::shopping::check_off;
use crate::store;

/// Outcome of logging a single purchase line.
#[derive(Debug, Clone)]
pub struct Report {
    /// Units actually written.
    pub quantity: u32,
    pub product: String,
    pub unit_price: f64,
    pub line_total: f64,
    /// Running totals for the calendar day of the purchase, this line included.
    pub today: Totals,
    /// Id of the stored row, present only for single-unit lines so the
    /// purchase can be undone by id.
    pub purchase_id: Option<i64>,
    pub checked_off: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailedLine {
    pub line: String,
    pub error: ParseError,
}

/// Outcome of logging several lines at once.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub lines: usize,
    /// Units written across all lines.
    pub saved: usize,
    pub total_spent: f64,
    /// Units whose insert failed.
    pub store_failures: usize,
    /// Lines that could not be parsed, in input order.
    pub failed: Vec<FailedLine>,
    pub checked_off: Vec<String>,
}

#[derive(Debug)]
pub enum Ingestion {
    Empty,
    Single(Report),
    Batch(BatchReport),
}

struct UnitsSaved {
    saved: u32,
    failed: u32,
    last_id: Option<i64>,
}

enum LineOutcome {
    Saved {
        price: f64,
        units: UnitsSaved,
        checked_off: Vec<String>,
    },
    Unparsed(FailedLine),
}

/// Write one row per unit. Failed inserts are logged and counted, never retried.
fn insert_units(conn: &Connection, timestamp: &str, parsed: &ParsedLine) -> UnitsSaved {
    let mut units = UnitsSaved {
        saved: 0,
        failed: 0,
        last_id: None,
    };
    for _ in 0..parsed.quantity {
        match store::insert_purchase(conn, timestamp, &parsed.product, parsed.price) {
            Ok(id) => {
                units.saved += 1;
                units.last_id = Some(id);
            }
            Err(e) => {
                units.failed += 1;
                tracing::warn!(product = %parsed.product, error = %e, "failed to save purchase");
            }
        }
    }
    units
}

/// Parse and store a single line; all units share the timestamp `now`.
pub fn ingest_one(conn: &Connection, line: &str, now: NaiveDateTime) -> Result<Report> {
    let parsed = parse_line(line)?;
    let timestamp = store::format_timestamp(now);

    let checked_off = check_off(conn, &parsed.product);
    let units = insert_units(conn, &timestamp, &parsed);

    if units.saved == 0 {
        return Err(GrocerError::StoreFailure(format!(
            "none of {} x {} could be saved",
            parsed.quantity, parsed.product
        )));
    }

    let today = store::day_summary(conn, now.date()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load today's totals");
        Totals::default()
    });

    let purchase_id = if parsed.quantity == 1 { units.last_id } else { None };

    tracing::debug!(
        product = %parsed.product,
        saved = units.saved,
        failed = units.failed,
        "logged purchase line"
    );

    Ok(Report {
        quantity: units.saved,
        line_total: parsed.price * f64::from(units.saved),
        unit_price: parsed.price,
        product: parsed.product,
        today,
        purchase_id,
        checked_off,
    })
}

fn ingest_line(conn: &Connection, line: &str, timestamp: &str) -> LineOutcome {
    match parse_line(line) {
        Ok(parsed) => {
            let checked_off = check_off(conn, &parsed.product);
            let units = insert_units(conn, timestamp, &parsed);
            LineOutcome::Saved {
                price: parsed.price,
                units,
                checked_off,
            }
        }
        Err(error) => LineOutcome::Unparsed(FailedLine {
            line: line.to_string(),
            error,
        }),
    }
}

/// Store every line that parses and collect the ones that don't. A bad line
/// or a failed insert never affects the other lines. The whole batch shares
/// the timestamp `now`.
pub fn ingest_batch<S: AsRef<str>>(conn: &Connection, lines: &[S], now: NaiveDateTime) -> BatchReport {
    let timestamp = store::format_timestamp(now);

    let outcomes: Vec<LineOutcome> = lines
        .iter()
        .map(|line| ingest_line(conn, line.as_ref(), &timestamp))
        .collect();

    let report = outcomes.into_iter().fold(
        BatchReport {
            lines: lines.len(),
            ..BatchReport::default()
        },
        |mut report, outcome| {
            match outcome {
                LineOutcome::Saved {
                    price,
                    units,
                    checked_off,
                } => {
                    report.saved += units.saved as usize;
                    report.total_spent += price * f64::from(units.saved);
                    report.store_failures += units.failed as usize;
                    report.checked_off.extend(checked_off);
                }
                LineOutcome::Unparsed(failed) => report.failed.push(failed),
            }
            report
        },
    );

    tracing::debug!(
        lines = report.lines,
        saved = report.saved,
        failed_lines = report.failed.len(),
        store_failures = report.store_failures,
        "logged purchase batch"
    );
    report
}

/// Route a raw message: blank lines are dropped, one remaining line goes
/// through [`ingest_one`], several through [`ingest_batch`].
pub fn ingest_message(conn: &Connection, text: &str, now: NaiveDateTime) -> Result<Ingestion> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    match lines.as_slice() {
        [] => Ok(Ingestion::Empty),
        [line] => Ok(Ingestion::Single(ingest_one(conn, line, now)?)),
        all => Ok(Ingestion::Batch(ingest_batch(conn, all, now))),
    }
}
