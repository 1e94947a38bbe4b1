//! `MultiplierSource` adapters
//!
//! Sources yield full snapshots of text rows; the runner reconciles them
//! against what the driver has already consumed (append-only).

use async_trait::async_trait;
use crashsim_ports::{MultiplierSource, SourceError, SourceResult};

/// Fixed text source - the manual-entry path
///
/// Returns the same snapshot on every fetch. Rows can be appended at
/// runtime, mirroring a user pasting more lines while a run is paused.
pub struct StaticSource {
    rows: Vec<String>,
}

impl StaticSource {
    /// Build from newline-separated text
    pub fn from_text(text: &str) -> Self {
        Self {
            rows: text.lines().map(str::to_string).collect(),
        }
    }

    /// Append more newline-separated rows
    pub fn push_text(&mut self, text: &str) {
        self.rows.extend(text.lines().map(str::to_string));
    }
}

#[async_trait]
impl MultiplierSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_rows(&mut self) -> SourceResult<Vec<String>> {
        Ok(self.rows.clone())
    }
}

/// Adapter over an external fetcher that yields fresh CSV text per poll
///
/// Stands in for whatever collaborator performs the actual network fetch
/// (spreadsheet export, file tail, test fixture). The callback returns the
/// full CSV body; this adapter splits it into rows.
pub struct CsvTextSource<F> {
    name: String,
    fetch: F,
}

impl<F> CsvTextSource<F>
where
    F: FnMut() -> SourceResult<String> + Send,
{
    pub fn new(name: impl Into<String>, fetch: F) -> Self {
        Self {
            name: name.into(),
            fetch,
        }
    }
}

#[async_trait]
impl<F> MultiplierSource for CsvTextSource<F>
where
    F: FnMut() -> SourceResult<String> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rows(&mut self) -> SourceResult<Vec<String>> {
        let body = (self.fetch)()?;
        Ok(body.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::filter_rows;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_static_source_snapshot_grows_by_append() {
        let mut source = StaticSource::from_text("1.5\n2.0");
        assert_eq!(source.fetch_rows().await.unwrap().len(), 2);

        source.push_text("3.5");
        let rows = source.fetch_rows().await.unwrap();
        assert_eq!(rows, vec!["1.5", "2.0", "3.5"]);
    }

    #[tokio::test]
    async fn test_csv_source_splits_and_filters() {
        let mut source = CsvTextSource::new("fixture", || {
            Ok("\"1.97\"\n\"bad\"\n\"2.40\"".to_string())
        });
        let rows = source.fetch_rows().await.unwrap();
        assert_eq!(filter_rows(rows), vec![dec!(1.97), dec!(2.40)]);
    }

    #[tokio::test]
    async fn test_csv_source_propagates_fetch_errors() {
        let mut source = CsvTextSource::new("failing", || {
            Err(SourceError::Fetch("503 from upstream".to_string()))
        });
        assert!(matches!(
            source.fetch_rows().await,
            Err(SourceError::Fetch(_))
        ));
    }
}
