//! Spreadsheet range handling
//!
//! Parses the `Sheet1!B1:B10000` notation and renders the public CSV export
//! URL for it. The actual HTTP fetch belongs to the embedding application;
//! this module only owns the string formats.

use std::fmt;
use std::str::FromStr;

use crashsim_ports::SourceError;

/// A sheet name plus cell range, e.g. `Sheet1!B1:B10000`
///
/// Sheet names may be wrapped in single quotes (`'My Sheet'!A1:A10`), as
/// spreadsheet UIs produce for names containing spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet: String,
    pub range: String,
}

impl SheetRange {
    /// CSV export URL for this range on a public spreadsheet
    pub fn csv_export_url(&self, sheet_id: &str) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}&range={}",
            sheet_id,
            url_encode(&self.sheet),
            url_encode(&self.range),
        )
    }
}

impl FromStr for SheetRange {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SourceError::InvalidRange(s.to_string());

        let (sheet, range) = s.split_once('!').ok_or_else(invalid)?;
        let sheet = sheet
            .strip_prefix('\'')
            .and_then(|v| v.strip_suffix('\''))
            .unwrap_or(sheet);
        if sheet.is_empty() {
            return Err(invalid());
        }

        // Range must look like A1:B10 (or open-ended columns like A:A)
        let (from, to) = range.split_once(':').ok_or_else(invalid)?;
        for cell in [from, to] {
            let mut chars = cell.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() => {}
                _ => return Err(invalid()),
            }
            if !chars.all(|c| c.is_ascii_alphanumeric()) {
                return Err(invalid());
            }
        }

        Ok(Self {
            sheet: sheet.to_string(),
            range: range.to_string(),
        })
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.sheet, self.range)
    }
}

/// Minimal percent-encoding for the characters sheet names actually contain
fn url_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '!' => out.push_str("%21"),
            '\'' => out.push_str("%27"),
            _ => out.push(c),
        }
    }
    out
}
