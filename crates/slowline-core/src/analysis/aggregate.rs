use super::AccessStats;
use crate::log::parse_line;
use crate::{Error, Result};
use std::io;

/// Streaming fold of raw access-log lines into per-endpoint statistics.
///
/// Each line is visited exactly once; lines that do not match the log
/// format still count toward the total so the parse-failure gate can be
/// evaluated once the stream is exhausted.
pub struct Aggregator {
    errors_limit: Option<f64>,
    stats: AccessStats,
}

impl Aggregator {
    pub fn new(errors_limit: Option<f64>) -> Self {
        Self {
            errors_limit,
            stats: AccessStats::default(),
        }
    }

    /// Consume a line stream and return the aggregated statistics.
    ///
    /// I/O errors from the stream abort the run immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ErrorsLimitExceeded`] when a limit is configured
    /// and any line failed to parse, and [`Error::Io`] on a failed read.
    pub fn consume<I>(mut self, lines: I) -> Result<AccessStats>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        for line in lines {
            let line = line?;
            self.stats.total_lines += 1;

            if let Some(record) = parse_line(&line) {
                self.stats.parsed_lines += 1;
                self.stats.total_time += record.request_time;
                self.stats.push_sample(record.path, record.request_time);
            }
        }

        self.finish()
    }

    fn finish(self) -> Result<AccessStats> {
        let Self {
            errors_limit,
            stats,
        } = self;

        // Any unparsable line trips the gate while a limit is configured;
        // the limit's value is carried for diagnostics only. An empty
        // stream skips the gate.
        if let Some(limit) = errors_limit
            && stats.total_lines > 0
        {
            let failed = stats.total_lines - stats.parsed_lines;
            let ratio = failed as f64 / stats.total_lines as f64;
            if ratio > 0.0 {
                return Err(Error::ErrorsLimitExceeded { limit, ratio });
            }
        }

        tracing::info!(
            "Aggregated {} of {} lines across {} endpoints",
            stats.parsed_lines,
            stats.total_lines,
            stats.endpoint_count(),
        );

        Ok(stats)
    }
}
