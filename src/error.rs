use thiserror::Error;

/// Why a purchase line could not be understood. Each variant carries the
/// offending line so it can be shown back to the user as typed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid format (no price): `{0}`")]
    InvalidFormat(String),

    #[error("Invalid price: `{0}`")]
    InvalidPrice(String),

    #[error("Empty product: `{0}`")]
    EmptyProduct(String),

    #[error("Quantity too large: `{0}`")]
    QuantityTooLarge(String),
}

#[derive(Error, Debug)]
pub enum GrocerError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Could not save to the database: {0}")]
    StoreFailure(String),

    #[error("Access denied for user: {0}")]
    Denied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, GrocerError>;
