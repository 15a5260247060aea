use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Letter code -> price, for a single currency.
pub type CurrencyTariffs = HashMap<String, Decimal>;

/// One year of postal tariffs as stored by the backend.
///
/// Every field is optional on the wire; the fetcher decides how to treat
/// records with a missing year or currency map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub currencies: Option<HashMap<String, CurrencyTariffs>>,
}
