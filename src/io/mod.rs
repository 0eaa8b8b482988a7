pub mod output;
pub mod reader;

pub use output::{create_writer, fmt_usd, OutputFormat, ReportWriter};
pub use reader::{read_csv, Dataset};

use anyhow::Result;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}
