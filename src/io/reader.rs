//! Dataset ingestion: a CSV file becomes a header row plus string
//! cells. This is the spreadsheet collaborator boundary; everything
//! downstream works on resolved roles and scrubbed values.

use anyhow::{Context, Result};
use std::path::Path;

/// A loaded tabular dataset. Cells stay as strings; parsing into
/// numbers happens during record extraction where failures can degrade
/// to zero contributions instead of errors.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Cell by row index and header name. `None` when the header does
    /// not exist or the row is ragged short.
    pub fn cell(&self, row: usize, header: &str) -> Option<&str> {
        let col = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Read a CSV file into a [`Dataset`]. Ragged rows are tolerated; a
/// missing file or unreadable header row is an error.
pub fn read_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to read row of {}", path.display()))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    log::info!("loaded {} rows from {}", rows.len(), path.display());
    Ok(Dataset { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset {
            headers: vec!["Importer".into(), "Year".into(), "Value".into()],
            rows: vec![
                vec!["ACME".into(), "2024".into(), "$1,000".into()],
                vec!["Short".into()],
            ],
        }
    }

    #[test]
    fn cell_lookup_by_header() {
        let d = dataset();
        assert_eq!(d.cell(0, "Value"), Some("$1,000"));
        assert_eq!(d.cell(0, "Missing"), None);
    }

    #[test]
    fn ragged_rows_yield_none_not_panic() {
        let d = dataset();
        assert_eq!(d.cell(1, "Year"), None);
        assert_eq!(d.cell(5, "Year"), None);
    }
}
