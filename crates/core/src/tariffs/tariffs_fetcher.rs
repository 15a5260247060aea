use ecollecto_catalog_api::TariffRecord;
use log::debug;
use std::sync::Arc;

use super::tariffs_errors::TariffError;
use super::tariffs_model::TariffSnapshot;
use super::tariffs_traits::TariffSourceTrait;

/// Retrieves tariff records and indexes them into a snapshot.
pub struct TariffFetcher {
    source: Arc<dyn TariffSourceTrait>,
}

impl TariffFetcher {
    pub fn new(source: Arc<dyn TariffSourceTrait>) -> Self {
        Self { source }
    }

    /// Fetch the records, select the most recent year and index the rest.
    ///
    /// Returns `Ok(None)` for a malformed or empty payload. Transport
    /// failures are returned as errors.
    pub async fn fetch_latest_tariffs(&self) -> Result<Option<TariffSnapshot>, TariffError> {
        let Some(records) = self.source.fetch_tariff_records().await? else {
            return Ok(None);
        };

        let Some(latest) = select_latest(&records) else {
            debug!("Tariff payload is empty");
            return Ok(None);
        };

        let snapshot = TariffSnapshot::from_records(latest, &records);
        debug!(
            "Selected tariffs for year {:?} out of {} records ({} dated years)",
            snapshot.latest.year,
            records.len(),
            snapshot.by_year.len()
        );
        Ok(Some(snapshot))
    }
}

/// Pick the record with the greatest year.
///
/// A later record replaces the current pick only when its year is strictly
/// greater, or when the current pick has no year. Ties keep the first record
/// seen; with no dated records at all the first record is returned.
pub fn select_latest(records: &[TariffRecord]) -> Option<&TariffRecord> {
    let first = records.first()?;
    Some(records.iter().fold(first, |acc, item| {
        match (item.year, acc.year) {
            (Some(year), Some(acc_year)) if year > acc_year => item,
            (Some(_), None) => item,
            _ => acc,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn record(id: &str, year: Option<i32>) -> TariffRecord {
        TariffRecord {
            id: Some(id.to_string()),
            year,
            ..Default::default()
        }
    }

    struct StaticSource(Result<Option<Vec<TariffRecord>>, TariffError>);

    #[async_trait]
    impl TariffSourceTrait for StaticSource {
        async fn fetch_tariff_records(
            &self,
        ) -> Result<Option<Vec<TariffRecord>>, TariffError> {
            self.0.clone()
        }
    }

    fn fetcher(result: Result<Option<Vec<TariffRecord>>, TariffError>) -> TariffFetcher {
        TariffFetcher::new(Arc::new(StaticSource(result)))
    }

    #[test]
    fn test_select_latest_picks_max_year() {
        let records = vec![
            record("a", Some(2022)),
            record("b", Some(2024)),
            record("c", Some(2023)),
        ];
        assert_eq!(select_latest(&records).unwrap().id.as_deref(), Some("b"));
    }

    #[test]
    fn test_select_latest_first_seen_wins_on_tie() {
        let records = vec![record("a", Some(2024)), record("b", Some(2024))];
        assert_eq!(select_latest(&records).unwrap().id.as_deref(), Some("a"));
    }

    #[test]
    fn test_select_latest_undated_first_record_is_replaced() {
        let records = vec![record("a", None), record("b", Some(2001))];
        assert_eq!(select_latest(&records).unwrap().id.as_deref(), Some("b"));
    }

    #[test]
    fn test_select_latest_undated_records_never_replace() {
        let records = vec![record("a", Some(2001)), record("b", None)];
        assert_eq!(select_latest(&records).unwrap().id.as_deref(), Some("a"));

        let undated = vec![record("a", None), record("b", None)];
        assert_eq!(select_latest(&undated).unwrap().id.as_deref(), Some("a"));
    }

    #[test]
    fn test_select_latest_empty() {
        assert!(select_latest(&[]).is_none());
    }

    #[tokio::test]
    async fn test_fetch_latest_normalizes_currencies() {
        let mut currencies = HashMap::new();
        currencies.insert(
            "uah".to_string(),
            HashMap::from([("H".to_string(), dec!(12.5))]),
        );
        let records = vec![
            record("old", Some(2020)),
            TariffRecord {
                id: Some("new".to_string()),
                year: Some(2024),
                currencies: Some(currencies),
                ..Default::default()
            },
        ];

        let snapshot = fetcher(Ok(Some(records)))
            .fetch_latest_tariffs()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.latest.year, Some(2024));
        assert_eq!(snapshot.latest.lookup("UAH", "H"), Some(dec!(12.5)));
        assert!(snapshot.year(2020).unwrap().is_empty());
        assert!(snapshot.year(2021).is_none());
    }

    #[tokio::test]
    async fn test_fetch_malformed_or_empty_is_none() {
        assert!(fetcher(Ok(None)).fetch_latest_tariffs().await.unwrap().is_none());
        assert!(fetcher(Ok(Some(vec![])))
            .fetch_latest_tariffs()
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_fetch_propagates_transport_failure() {
        let err = TariffError::FetchFailed {
            message: "connection refused".to_string(),
            transient: true,
        };
        let result = fetcher(Err(err.clone())).fetch_latest_tariffs().await;
        assert_eq!(result, Err(err));
    }
}
