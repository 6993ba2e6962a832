use crate::types::errors::NumericError;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::trace;

/// How a balance cell is cleaned before parsing.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalanceCleanup {
    #[default]
    PlainNumeric,
    /// Balances printed as `1,234.00 Dr.` / `1,234.00 Cr.`
    SuffixedDrCr
}

/// A cleaned monetary cell: either a decimal or an explicit missing marker.
///
/// `Missing` counts as zero when summed but renders as an empty cell, so a
/// genuine `0.00` stays distinguishable from an unreadable value.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Numeric {
    Value(Decimal),
    Missing
}

impl Numeric {
    /// Cleans noisy currency-like text. Never fails, unreadable text becomes `Missing`.
    pub fn parse(text: &str, cleanup: BalanceCleanup) -> Self {
        match parse_amount(text, cleanup) {
            Ok(value) => Numeric::Value(value),
            Err(error) => {
                trace!("{error} (input {text:?})");
                Numeric::Missing
            }
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Numeric::Value(value) => Some(*value),
            Numeric::Missing => None
        }
    }

    pub fn or_zero(&self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }
}

impl Default for Numeric {
    fn default() -> Self {
        Numeric::Value(Decimal::ZERO)
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Numeric::Value(value)
    }
}

impl Display for Numeric {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Value(value) => write!(formatter, "{value}"),
            Numeric::Missing => Ok(())
        }
    }
}

fn dr_cr_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[\s.]*(dr|cr)\.?$").expect("dr/cr suffix regex"))
}

/// Strict form of [`Numeric::parse`] that reports why a cell could not be read.
pub fn parse_amount(text: &str, cleanup: BalanceCleanup) -> Result<Decimal, NumericError> {
    let mut value: String = text.trim()
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | ','))
        .collect();

    if cleanup == BalanceCleanup::SuffixedDrCr {
        value = dr_cr_suffix_re().replace(&value, "").into_owned();
    }

    let value = value.trim();

    if value.is_empty() {
        return Err(NumericError::Empty);
    }

    if value.eq_ignore_ascii_case("nan") {
        return Err(NumericError::NotANumber);
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|error| NumericError::InvalidFormat(format!("{value:?} is not a number: {error}")))
}
