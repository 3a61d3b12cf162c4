//! Rendering an estimate as a currency string.

use crate::error::{EstimatorError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How digits are grouped in the integer part.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitGrouping {
    /// Groups of three: `5,648,224`.
    #[default]
    Thousands,
    /// Last three digits, then groups of two: `56,48,224`.
    Indian,
}

impl DigitGrouping {
    pub fn group(self, value: u64) -> String {
        let digits = value.to_string();
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 2);
        for (i, ch) in digits.chars().enumerate() {
            let remaining = len - i;
            if i > 0 && self.is_boundary(remaining) {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// Whether a separator goes before the digit with `remaining` digits left (inclusive).
    fn is_boundary(self, remaining: usize) -> bool {
        match self {
            DigitGrouping::Thousands => remaining % 3 == 0,
            DigitGrouping::Indian => remaining == 3 || (remaining > 3 && remaining % 2 == 1),
        }
    }
}

/// Turn a raw model output into a whole displayable amount.
///
/// Truncates toward zero. Negative outputs are clamped to zero; non-finite
/// outputs are a predictor failure.
pub fn truncate_estimate(raw: f64) -> Result<u64> {
    if !raw.is_finite() {
        return Err(EstimatorError::Predictor(format!(
            "estimate is not a finite number ({})",
            raw
        )));
    }
    if raw < 0.0 {
        warn!(raw, "negative estimate clamped to zero");
        return Ok(0);
    }
    // `as` saturates above u64::MAX.
    Ok(raw.trunc() as u64)
}

/// Currency formatting settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFormatter {
    pub currency_symbol: String,
    pub grouping: DigitGrouping,
}

impl Default for PriceFormatter {
    fn default() -> Self {
        PriceFormatter {
            currency_symbol: "₹".to_string(),
            grouping: DigitGrouping::Thousands,
        }
    }
}

impl PriceFormatter {
    /// `₹ 5,648,224`
    pub fn format(&self, price: u64) -> String {
        format!("{} {}", self.currency_symbol, self.grouping.group(price))
    }

    /// The line shown after a successful prediction.
    pub fn message(&self, price: u64) -> String {
        format!("Estimated House Price: {}", self.format(price))
    }
}
