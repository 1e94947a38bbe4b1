//! Crashsim Feed
//!
//! The multiplier input boundary:
//! - row filtering (trim, unquote, parse decimal, discard invalid)
//! - spreadsheet range parsing and CSV export URL construction
//! - `MultiplierSource` adapters for static text and external CSV fetchers
//!
//! The core never fetches anything itself; whatever collaborator acquires
//! the data, it lands here as text rows and leaves as clean multipliers.

mod parse;
mod sheet;
mod source;

pub use parse::{filter_rows, parse_manual};
pub use sheet::SheetRange;
pub use source::{CsvTextSource, StaticSource};
