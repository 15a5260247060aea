use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Face value of a stamp as it arrives from the backend.
///
/// Most stamps carry a text denomination (`"H"`, `"F+8.00"`, `"60.00 грн"`),
/// older records sometimes carry a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Denomination {
    Text(String),
    Number(Decimal),
}

impl Denomination {
    /// Falsy denominations (empty text or zero) carry no price.
    pub fn is_blank(&self) -> bool {
        match self {
            Denomination::Text(text) => text.is_empty(),
            Denomination::Number(value) => value.is_zero(),
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denomination::Text(text) => f.write_str(text),
            Denomination::Number(value) => write!(f, "{}", value.normalize()),
        }
    }
}

impl From<&str> for Denomination {
    fn from(value: &str) -> Self {
        Denomination::Text(value.to_string())
    }
}

impl From<String> for Denomination {
    fn from(value: String) -> Self {
        Denomination::Text(value)
    }
}

impl From<Decimal> for Denomination {
    fn from(value: Decimal) -> Self {
        Denomination::Number(value)
    }
}

impl From<i64> for Denomination {
    fn from(value: i64) -> Self {
        Denomination::Number(Decimal::from(value))
    }
}
