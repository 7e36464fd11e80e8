/// One purchased unit as stored in the `purchases` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub id: i64,
    pub timestamp: String,
    pub product: String,
    pub price: f64,
}

/// A pending entry on the shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    pub id: i64,
    pub product: String,
}

/// Intermediate representation of one typed line before any rows are written.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub product: String,
    pub price: f64,
    pub quantity: u32,
}

/// Sum and count of purchases over some period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub total: f64,
    pub count: i64,
}

impl Totals {
    pub fn average(&self) -> f64 {
        if self.count > 0 {
            self.total / self.count as f64
        } else {
            0.0
        }
    }
}
