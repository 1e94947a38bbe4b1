use async_trait::async_trait;

use crate::error::SourceResult;

/// Port for external multiplier row sources
///
/// A source yields the full current snapshot of text rows on every fetch
/// (the shape both a textarea and a spreadsheet CSV export naturally
/// produce). Row filtering and append-only reconciliation against what the
/// driver already consumed happen downstream; sources just deliver text.
#[async_trait]
pub trait MultiplierSource: Send {
    /// Source name for logging
    fn name(&self) -> &str;

    /// Fetch the current full snapshot of rows, oldest first
    async fn fetch_rows(&mut self) -> SourceResult<Vec<String>>;
}
