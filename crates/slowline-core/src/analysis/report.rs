use super::{AccessStats, ReportRow};
use crate::{Error, Result};

/// Builds the ranked endpoint table from aggregated statistics.
pub struct ReportBuilder {
    top_n: usize,
}

impl ReportBuilder {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Derive per-endpoint metrics and keep the `top_n` endpoints with the
    /// greatest total request time.
    ///
    /// Shares are computed against the run-wide totals before rounding, so
    /// the `count_perc` and `time_perc` columns each sum to 100 within
    /// rounding tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Analysis`] when the statistics contain no parsed
    /// records; the share columns would divide by zero.
    pub fn build(&self, stats: &AccessStats) -> Result<Vec<ReportRow>> {
        if stats.parsed_lines == 0 || stats.total_time == 0.0 {
            return Err(Error::Analysis(
                "no parsed records to report on".to_string(),
            ));
        }

        let mut ranked: Vec<(f64, ReportRow)> = stats
            .endpoints()
            .map(|(url, samples)| {
                let count = samples.len();
                let time_sum: f64 = samples.iter().sum();
                let time_max = samples.iter().copied().fold(f64::MIN, f64::max);

                let row = ReportRow {
                    url: url.to_string(),
                    count,
                    count_perc: round3(100.0 * count as f64 / stats.parsed_lines as f64),
                    time_sum: round3(time_sum),
                    time_perc: round3(100.0 * time_sum / stats.total_time),
                    time_avg: round3(time_sum / count as f64),
                    time_max: round3(time_max),
                    time_med: round3(median(samples)),
                };
                (time_sum, row)
            })
            .collect();

        // Stable sort: endpoints with equal total time keep first-seen order
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.truncate(self.top_n);

        tracing::debug!(
            "Built report with {} of {} endpoints",
            ranked.len(),
            stats.endpoint_count(),
        );

        Ok(ranked.into_iter().map(|(_, row)| row).collect())
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Standard median: the middle sample, or the mean of the two middle
/// samples for even counts.
fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
