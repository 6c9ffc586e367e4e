//! JSON change reports.

use std::path::Path;

use tracing::info;

use crate::error::CleanerResult;
use crate::processing::ChangeReport;

/// Pretty-printed JSON (2-space indent) for `report`.
pub fn report_to_json(report: &ChangeReport) -> CleanerResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write `report` to `path` as UTF-8 JSON.
pub fn write_report(path: impl AsRef<Path>, report: &ChangeReport) -> CleanerResult<()> {
    let path = path.as_ref();
    std::fs::write(path, report_to_json(report)?)?;
    info!(path = %path.display(), "wrote report");
    Ok(())
}
