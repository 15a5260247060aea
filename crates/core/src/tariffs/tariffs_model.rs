use ecollecto_catalog_api::TariffRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Rendered in place of a price that cannot be resolved.
pub const NOT_AVAILABLE: &str = "N/A";

/// Currencies a denomination can be priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TariffCurrency {
    Uah,
    Usd,
}

impl TariffCurrency {
    /// Order in which letter codes are looked up.
    pub const LOOKUP_ORDER: [TariffCurrency; 2] = [TariffCurrency::Uah, TariffCurrency::Usd];

    pub fn as_str(&self) -> &'static str {
        match self {
            TariffCurrency::Uah => "UAH",
            TariffCurrency::Usd => "USD",
        }
    }
}

impl fmt::Display for TariffCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authoritative tariff table: currency -> letter code -> price.
///
/// Currency keys are stored uppercased, letter codes exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TariffTable {
    pub year: Option<i32>,
    pub currencies: BTreeMap<String, BTreeMap<String, Decimal>>,
}

impl TariffTable {
    /// Build a table from a wire record, uppercasing currency keys.
    ///
    /// When two keys collide after uppercasing, the one already written in
    /// uppercase wins.
    pub fn from_record(record: &TariffRecord) -> Self {
        let mut currencies: BTreeMap<String, BTreeMap<String, Decimal>> = BTreeMap::new();

        if let Some(source) = &record.currencies {
            let mut keys: Vec<&String> = source.keys().collect();
            keys.sort();

            for key in keys {
                let codes: BTreeMap<String, Decimal> = source[key]
                    .iter()
                    .map(|(code, price)| (code.clone(), *price))
                    .collect();
                let upper = key.to_uppercase();
                if *key == upper {
                    currencies.insert(upper, codes);
                } else {
                    currencies.entry(upper).or_insert(codes);
                }
            }
        }

        Self {
            year: record.year,
            currencies,
        }
    }

    /// Tariffs for one currency. The currency match is case-insensitive.
    pub fn currency(&self, currency: &str) -> Option<&BTreeMap<String, Decimal>> {
        self.currencies.get(&currency.to_uppercase())
    }

    /// Price of `code` in `currency`; exact match on the code.
    pub fn lookup(&self, currency: &str, code: &str) -> Option<Decimal> {
        self.currency(currency)
            .and_then(|codes| codes.get(code))
            .copied()
    }

    /// Resolve a letter code against UAH first, then USD.
    pub fn resolve_code(&self, code: &str) -> Option<(Decimal, TariffCurrency)> {
        TariffCurrency::LOOKUP_ORDER.iter().find_map(|currency| {
            self.lookup(currency.as_str(), code)
                .map(|price| (price, *currency))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.values().all(|codes| codes.is_empty())
    }
}

/// Every table from one fetch: the latest plus one per dated year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffSnapshot {
    pub latest: Arc<TariffTable>,
    pub by_year: BTreeMap<i32, Arc<TariffTable>>,
}

impl TariffSnapshot {
    /// Index `records` by year around an already selected `latest` record.
    ///
    /// Undated records are left out of the index. For a repeated year the
    /// first record seen wins, the same tie rule used to pick the latest.
    pub fn from_records(latest: &TariffRecord, records: &[TariffRecord]) -> Self {
        let mut by_year: BTreeMap<i32, Arc<TariffTable>> = BTreeMap::new();
        for record in records {
            if let Some(year) = record.year {
                by_year
                    .entry(year)
                    .or_insert_with(|| Arc::new(TariffTable::from_record(record)));
            }
        }

        let latest = latest
            .year
            .and_then(|year| by_year.get(&year).cloned())
            .unwrap_or_else(|| Arc::new(TariffTable::from_record(latest)));

        Self { latest, by_year }
    }

    /// The table for one year, if the backend published it.
    pub fn year(&self, year: i32) -> Option<&Arc<TariffTable>> {
        self.by_year.get(&year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn record(currencies: Vec<(&str, Vec<(&str, Decimal)>)>) -> TariffRecord {
        let currencies = currencies
            .into_iter()
            .map(|(currency, codes)| {
                (
                    currency.to_string(),
                    codes
                        .into_iter()
                        .map(|(code, price)| (code.to_string(), price))
                        .collect::<HashMap<_, _>>(),
                )
            })
            .collect();
        TariffRecord {
            year: Some(2024),
            currencies: Some(currencies),
            ..Default::default()
        }
    }

    #[test]
    fn test_currency_keys_are_uppercased() {
        let table = TariffTable::from_record(&record(vec![("uah", vec![("H", dec!(12.5))])]));
        assert!(table.currencies.contains_key("UAH"));
        assert_eq!(table.lookup("Uah", "H"), Some(dec!(12.5)));
    }

    #[test]
    fn test_code_lookup_is_exact() {
        let table = TariffTable::from_record(&record(vec![("UAH", vec![("H", dec!(12.5))])]));
        assert_eq!(table.lookup("UAH", "h"), None);
    }

    #[test]
    fn test_uppercase_key_wins_collision() {
        let table = TariffTable::from_record(&record(vec![
            ("uah", vec![("H", dec!(1))]),
            ("UAH", vec![("H", dec!(2))]),
        ]));
        assert_eq!(table.lookup("UAH", "H"), Some(dec!(2)));
    }

    #[test]
    fn test_resolve_code_prefers_uah() {
        let table = TariffTable::from_record(&record(vec![
            ("UAH", vec![("F", dec!(10))]),
            ("USD", vec![("F", dec!(0.5)), ("W", dec!(1.2))]),
        ]));
        assert_eq!(
            table.resolve_code("F"),
            Some((dec!(10), TariffCurrency::Uah))
        );
        assert_eq!(
            table.resolve_code("W"),
            Some((dec!(1.2), TariffCurrency::Usd))
        );
        assert_eq!(table.resolve_code("Z"), None);
    }

    #[test]
    fn test_record_without_currencies_is_empty() {
        let table = TariffTable::from_record(&TariffRecord {
            year: Some(2020),
            ..Default::default()
        });
        assert!(table.is_empty());
        assert_eq!(table.year, Some(2020));
    }

    #[test]
    fn test_snapshot_indexes_dated_records() {
        let mut older = record(vec![("UAH", vec![("H", dec!(8))])]);
        older.year = Some(2023);
        let mut duplicate = record(vec![("UAH", vec![("H", dec!(99))])]);
        duplicate.year = Some(2023);
        let mut undated = record(vec![("UAH", vec![("H", dec!(1))])]);
        undated.year = None;
        let latest = record(vec![("UAH", vec![("H", dec!(12.5))])]);

        let records = vec![older, duplicate, undated, latest];
        let snapshot = TariffSnapshot::from_records(&records[3], &records);

        assert_eq!(snapshot.by_year.keys().copied().collect::<Vec<_>>(), vec![2023, 2024]);
        assert_eq!(snapshot.year(2023).unwrap().lookup("UAH", "H"), Some(dec!(8)));
        assert!(snapshot.year(2022).is_none());
        assert!(Arc::ptr_eq(&snapshot.latest, snapshot.year(2024).unwrap()));
        assert_eq!(snapshot.latest.lookup("UAH", "H"), Some(dec!(12.5)));
    }

    #[test]
    fn test_snapshot_with_undated_latest() {
        let mut undated = record(vec![("USD", vec![("W", dec!(1.2))])]);
        undated.year = None;
        let records = vec![undated];
        let snapshot = TariffSnapshot::from_records(&records[0], &records);

        assert!(snapshot.by_year.is_empty());
        assert_eq!(snapshot.latest.lookup("USD", "W"), Some(dec!(1.2)));
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&TariffCurrency::Usd).unwrap(),
            "\"USD\""
        );
    }
}
