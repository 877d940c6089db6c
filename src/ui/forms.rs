//! Parsers for the answers typed at prompts. Each returns a user-facing
//! message on failure so the session can show it and ask again.

use anyhow::{anyhow, Result};

/// Parse a decimal number typed at a prompt. Sign handling is left to the
/// `Film` setters, which clamp negatives to zero.
pub(crate) fn parse_number(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Please enter a number."));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| anyhow!("Please enter a number."))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(anyhow!("Please enter a finite number."))
    }
}

/// `y` or `yes` in any case means yes, everything else means no.
pub(crate) fn parse_yes(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Validate a 1-based library position against the current library size.
pub(crate) fn parse_position(raw: &str, len: usize) -> Result<usize> {
    let position = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| anyhow!("Please enter a number between 1 and {len}."))?;
    if (1..=len).contains(&position) {
        Ok(position)
    } else {
        Err(anyhow!("Please enter a number between 1 and {len}."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_decimals_and_negatives() {
        assert_eq!(parse_number(" 2.05 ").unwrap(), 2.05);
        assert_eq!(parse_number("-3").unwrap(), -3.0);
        assert_eq!(parse_number("1e2").unwrap(), 100.0);
    }

    #[test]
    fn numbers_reject_text_and_infinities() {
        assert!(parse_number("").is_err());
        assert!(parse_number("abc").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("NaN").is_err());
    }

    #[test]
    fn yes_answers() {
        assert!(parse_yes("y"));
        assert!(parse_yes("Yes\n"));
        assert!(!parse_yes("n"));
        assert!(!parse_yes(""));
        assert!(!parse_yes("yep"));
    }

    #[test]
    fn positions_must_be_in_range() {
        assert_eq!(parse_position("2", 3).unwrap(), 2);
        assert!(parse_position("0", 3).is_err());
        assert!(parse_position("4", 3).is_err());
        assert!(parse_position("-1", 3).is_err());
        assert!(parse_position("two", 3).is_err());
    }
}
