use anyhow::Result;
use console::style;
use slowline_core::analysis::{Aggregator, ReportBuilder};
use slowline_core::log::{LogLines, find_latest_log};
use slowline_core::render::render_report;
use std::fs;

use crate::config::Config;

/// Name of the HTML template expected inside the report directory.
const TEMPLATE_FILE: &str = "report.html";

/// Run one report cycle: find the newest access log, aggregate it, and
/// render the top-N report next to the template.
///
/// A missing log directory, a missing template, or an already written
/// report for the log's date all end the run early without an error; only
/// I/O failures and a tripped parse-failure gate propagate.
pub fn execute(config: &Config) -> Result<()> {
    let Some(log) = find_latest_log(&config.log_dir)? else {
        return Ok(());
    };

    tracing::info!(
        "Using access log {} ({})",
        log.path.display(),
        log.date.format("%Y-%m-%d"),
    );

    if !config.report_dir.is_dir() {
        fs::create_dir_all(&config.report_dir)?;
        tracing::info!("Created report directory {}", config.report_dir.display());
    }

    let template_path = config.report_dir.join(TEMPLATE_FILE);
    if !template_path.is_file() {
        tracing::error!("Report template {} does not exist", template_path.display());
        return Ok(());
    }

    let report_name = format!("report-{}.html", log.date.format("%Y.%m.%d"));
    let report_path = config.report_dir.join(report_name);
    if report_path.is_file() {
        tracing::info!("Report {} is up to date", report_path.display());
        return Ok(());
    }

    let lines = LogLines::open(&log.path)?;
    let stats = Aggregator::new(config.errors_limit).consume(lines)?;
    let rows = ReportBuilder::new(config.report_size).build(&stats)?;
    render_report(&template_path, &report_path, &rows)?;

    println!(
        "{} {}",
        style("Report written to").green(),
        style(report_path.display()).bold(),
    );

    Ok(())
}
