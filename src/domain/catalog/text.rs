//! Text normalization shared by catalog types.

use crate::domain::foundation::ValidationError;

/// Trims a required field, rejecting blank input.
pub(crate) fn required_text(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional field; blank input clears it.
pub(crate) fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Largest accepted amount. Keeps `amount * 100` exact and inside `i64`.
pub(crate) const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Accepts a non-negative, finite amount no larger than [`MAX_AMOUNT`].
pub(crate) fn money(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::invalid_format(
            field,
            "must be a non-negative number",
        ));
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::invalid_format(
            field,
            format!("must not exceed {}", MAX_AMOUNT),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_text_clears_whitespace() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn money_rejects_negative_and_nan() {
        assert!(money("price", -0.01).is_err());
        assert!(money("price", f64::NAN).is_err());
        assert!(money("price", f64::INFINITY).is_err());
        assert_eq!(money("price", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn money_rejects_amounts_past_the_ceiling() {
        assert_eq!(money("price", MAX_AMOUNT).unwrap(), MAX_AMOUNT);
        assert!(money("price", MAX_AMOUNT + 1.0).is_err());
        assert!(money("previousPrice", f64::MAX).is_err());
    }
}
