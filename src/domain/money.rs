use super::ValidationError;

/// Money is represented as integer cents to avoid floating-point drift when
/// summing expenses. 1 unit = 100 cents, so $40.00 = 4000 cents.
pub type Cents = i64;

/// Format cents as a human-readable amount with two decimals.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Format cents with the currency prefix used on every display surface.
/// Example: 6000 -> "$60.00", -250 -> "-$2.50"
pub fn format_money(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Parse decimal text into cents.
/// Accepts "50", "50.5", ".5", "12.34" and a leading sign. At most two
/// fractional digits are allowed.
pub fn parse_cents(input: &str) -> Result<Cents, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidAmount(trimmed.to_string());

    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (digits, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(invalid());
    }
    if !units_str.bytes().all(|b| b.is_ascii_digit())
        || !decimal_str.bytes().all(|b| b.is_ascii_digit())
        || decimal_str.len() > 2
    {
        return Err(invalid());
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| invalid())?
    };
    // "5" after the point means 50 cents
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => decimal_str.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => decimal_str.parse().map_err(|_| invalid())?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or_else(invalid)?;
    Ok(if negative { -cents } else { cents })
}

/// Parse a user-entered amount that must be present and non-negative.
/// This is the single validation contract shared by money and expense input.
pub fn parse_amount(input: &str) -> Result<Cents, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyAmount);
    }
    let cents = parse_cents(input)?;
    if cents < 0 {
        return Err(ValidationError::NegativeAmount(input.trim().to_string()));
    }
    Ok(cents)
}

/// Convert a stored currency number (e.g. `40.0`) to cents, rounding to the
/// nearest cent. Returns `None` for NaN, infinities and values whose cents
/// reach ±2^63, so `i64::MIN` is never produced.
pub fn cents_from_units(value: f64) -> Option<Cents> {
    if !value.is_finite() {
        return None;
    }
    let scaled = (value * 100.0).round();
    // i64::MAX as f64 rounds up to 2^63
    if scaled.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(scaled as Cents)
}

/// Convert cents to the currency number written to storage.
pub fn cents_to_units(cents: Cents) -> f64 {
    cents as f64 / 100.0
}
