use std::fmt;

/// Money is represented as integer paise to avoid floating-point precision issues.
/// 1 rupee = 100 paise, so ₹50.00 = 5000 paise.
pub type Paise = i64;

/// Format paise as a human-readable amount.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_paise(paise: Paise) -> String {
    let sign = if paise < 0 { "-" } else { "" };
    let abs = paise.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Format paise with the rupee sign, for receipts and CLI output.
pub fn format_rupees(paise: Paise) -> String {
    format!("₹{}", format_paise(paise))
}

/// Parse a decimal string into paise.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000.
/// More than two decimal digits are truncated.
pub fn parse_paise(input: &str) -> Result<Paise, ParsePaiseError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((u, d)) => {
            if d.contains('.') {
                return Err(ParsePaiseError::InvalidFormat);
            }
            (u, d)
        }
        None => (digits, ""),
    };

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParsePaiseError::InvalidFormat)?
    };

    // Pad or truncate the decimal part to exactly two digits.
    let decimal: i64 = match decimal_str.len() {
        0 => 0,
        1 => {
            decimal_str
                .parse::<i64>()
                .map_err(|_| ParsePaiseError::InvalidFormat)?
                * 10
        }
        _ => decimal_str
            .get(..2)
            .ok_or(ParsePaiseError::InvalidFormat)?
            .parse()
            .map_err(|_| ParsePaiseError::InvalidFormat)?,
    };

    let paise = units * 100 + decimal;
    Ok(if negative { -paise } else { paise })
}

/// Subtotal for a line of goods: quantity times unit price, rounded to the
/// nearest paisa. Quantities are fractional because goods are sold by weight.
pub fn line_total(quantity: f64, price: Paise) -> Paise {
    (quantity * price as f64).round() as Paise
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsePaiseError {
    InvalidFormat,
}

impl fmt::Display for ParsePaiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePaiseError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParsePaiseError {}
