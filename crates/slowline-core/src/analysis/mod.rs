mod aggregate;
mod report;

pub use aggregate::Aggregator;
pub use report::ReportBuilder;

use serde::Serialize;
use std::collections::HashMap;

/// Per-endpoint latency samples and run totals produced by [`Aggregator`].
///
/// Endpoints are kept in first-seen order so that downstream ranking has a
/// deterministic tie-break.
#[derive(Debug, Clone, Default)]
pub struct AccessStats {
    pub total_lines: u64,
    pub parsed_lines: u64,
    pub total_time: f64,
    buckets: Vec<(String, Vec<f64>)>,
    index: HashMap<String, usize>,
}

impl AccessStats {
    pub(crate) fn push_sample(&mut self, path: String, request_time: f64) {
        match self.index.get(&path) {
            Some(&i) => self.buckets[i].1.push(request_time),
            None => {
                self.index.insert(path.clone(), self.buckets.len());
                self.buckets.push((path, vec![request_time]));
            }
        }
    }

    /// Iterate endpoints with their raw samples, in first-seen order.
    pub fn endpoints(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.buckets
            .iter()
            .map(|(url, samples)| (url.as_str(), samples.as_slice()))
    }

    pub fn endpoint_count(&self) -> usize {
        self.buckets.len()
    }
}

/// One row of the rendered report table.
///
/// Field names match the `$table_json` keys expected by the HTML template.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub url: String,
    pub count: usize,
    pub count_perc: f64,
    pub time_sum: f64,
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}
