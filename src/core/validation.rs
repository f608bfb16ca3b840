//! Field checks shared by the vehicle, payment and gold record drafts.

use crate::errors::{Error, Result};

/// Trims `value`, rejecting it if nothing is left.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingField { field });
    }
    Ok(trimmed.to_string())
}

/// Accepts finite amounts that are zero or more.
pub(crate) fn non_negative(field: &'static str, amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { field, amount });
    }
    Ok(amount)
}

/// Accepts finite amounts strictly greater than zero.
pub(crate) fn positive(field: &'static str, amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { field, amount });
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("owner_name", "  Rajesh  ").unwrap(), "Rajesh");
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let result = required_text("owner_name", "   ");
        assert!(matches!(
            result,
            Err(Error::MissingField {
                field: "owner_name"
            })
        ));
    }

    #[test]
    fn test_amount_checks() {
        assert_eq!(non_negative("monthly_amount", 0.0).unwrap(), 0.0);
        assert!(non_negative("monthly_amount", -1.0).is_err());
        assert!(non_negative("monthly_amount", f64::NAN).is_err());
        assert!(positive("weight", 0.0).is_err());
        assert!(positive("weight", f64::INFINITY).is_err());
        assert_eq!(positive("weight", 2.5).unwrap(), 2.5);
    }
}
