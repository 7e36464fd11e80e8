use crate::error::ParseError;
use crate::models::ParsedLine;

/// Largest quantity a single line may ask for; each unit is its own row.
pub const MAX_QUANTITY: u32 = 1000;

/// Digits only (an optional leading `+` allowed) and not all zeros, however
/// many digits there are.
fn is_positive_integer(token: &str) -> bool {
    let digits = token.strip_prefix('+').unwrap_or(token);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.bytes().any(|b| b != b'0')
}

/// A leading token counts as a quantity only when it is a whole number above
/// zero. Quantities above [`MAX_QUANTITY`] are rejected rather than
/// reinterpreted as part of the product.
fn parse_quantity(token: &str, line: &str) -> Result<Option<u32>, ParseError> {
    if !is_positive_integer(token) {
        return Ok(None);
    }
    match token.parse::<u32>() {
        Ok(q) if q <= MAX_QUANTITY => Ok(Some(q)),
        _ => Err(ParseError::QuantityTooLarge(line.to_string())),
    }
}

fn parse_price(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
}

/// Parse one purchase line of the form `[quantity] product price`.
///
/// The price is always the last whitespace-separated token and the quantity,
/// when present, the first one; whatever sits between them is the product, so
/// multi-word names like `3 Tomato Sauce 15.50` need no quoting. A product
/// that is itself a bare number is rejected.
pub fn parse_line(line: &str) -> Result<ParsedLine, ParseError> {
    let line = line.trim();

    let Some(last_space) = line.rfind(char::is_whitespace) else {
        return Err(ParseError::InvalidFormat(line.to_string()));
    };

    let price = parse_price(&line[last_space..])
        .ok_or_else(|| ParseError::InvalidPrice(line.to_string()))?;

    let remainder = line[..last_space].trim();

    let (quantity, product) = match remainder.find(char::is_whitespace) {
        None => {
            if is_positive_integer(remainder) {
                return Err(ParseError::EmptyProduct(line.to_string()));
            }
            (1, remainder)
        }
        Some(first_space) => match parse_quantity(&remainder[..first_space], line)? {
            Some(quantity) => (quantity, remainder[first_space..].trim()),
            None => (1, remainder),
        },
    };

    if product.is_empty() {
        return Err(ParseError::EmptyProduct(line.to_string()));
    }

    Ok(ParsedLine {
        product: product.to_string(),
        price,
        quantity,
    })
}
