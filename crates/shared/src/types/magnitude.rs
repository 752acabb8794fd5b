//! Signed-magnitude parsing.
//!
//! The service renders negative amounts in accounting notation: the numeral
//! enclosed in parentheses, `(42.50)`, instead of a leading minus sign. This
//! module is the only place that notation is interpreted.
//!
//! CRITICAL: Never use floating-point for money. Values are `rust_decimal::Decimal`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};

/// Parses an accounting-notation decimal string.
///
/// A leading `(` marks a negative amount; the first and last characters are
/// stripped and the remainder is parsed and negated.
///
/// # Errors
///
/// Returns `TallyError::MalformedMagnitude` if the remainder is not a decimal literal.
pub fn parse_magnitude(raw: &str) -> TallyResult<Decimal> {
    let malformed = || TallyError::magnitude(raw);

    if raw.starts_with('(') {
        let inner = raw
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let value = parse_literal(inner).ok_or_else(malformed)?;
        Ok(-value)
    } else {
        parse_literal(raw).ok_or_else(malformed)
    }
}

fn parse_literal(literal: &str) -> Option<Decimal> {
    // `Decimal::from_str` tolerates `_` separators; the service never sends them.
    if literal.is_empty() || literal.contains('_') {
        return None;
    }
    Decimal::from_str(literal).ok()
}

/// A parsed amount paired with the string the service rendered it as.
///
/// The presentation is authoritative for display: service rounding is not
/// always reproducible by formatting the parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magnitude {
    /// Exact parsed value.
    pub value: Decimal,
    /// The string exactly as received.
    pub presentation: String,
}

impl Magnitude {
    /// Parses a presentation string, keeping it verbatim.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::MalformedMagnitude` if the string is not a valid amount.
    pub fn parse(presentation: impl Into<String>) -> TallyResult<Self> {
        let presentation = presentation.into();
        let value = parse_magnitude(&presentation)?;
        Ok(Self {
            value,
            presentation,
        })
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.presentation)
    }
}
