use crate::Result;
use crate::analysis::ReportRow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Placeholder in the HTML template that receives the JSON-encoded table.
const TABLE_PLACEHOLDER: &str = "$table_json";

/// Render the report rows into the HTML template and write the report file.
pub fn render_report(template_path: &Path, report_path: &Path, rows: &[ReportRow]) -> Result<()> {
    tracing::debug!("Rendering report to {}", report_path.display());

    let template = fs::read_to_string(template_path)?;
    let table_json = serde_json::to_string(rows)?;
    let html = template.replace(TABLE_PLACEHOLDER, &table_json);

    let file = File::create(report_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(html.as_bytes())?;
    writer.flush()?;

    tracing::info!(
        "Wrote report with {} rows to {}",
        rows.len(),
        report_path.display()
    );

    Ok(())
}
