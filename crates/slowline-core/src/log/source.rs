use crate::Result;
use chrono::NaiveDate;
use flate2::read::GzDecoder;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

lazy_static! {
    static ref LOG_NAME_RE: Regex =
        Regex::new(r"^nginx-access-ui\.log-(\d{8})(\.gz)?$").unwrap();
}

/// A discovered access log candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub date: NaiveDate,
}

/// Find the most recent access log in a directory.
///
/// Scans the directory's immediate entries for names of the form
/// `nginx-access-ui.log-YYYYMMDD` with an optional `.gz` suffix and keeps
/// the entry with the greatest embedded date. Names that match the pattern
/// but carry an impossible calendar date are skipped. On equal dates the
/// first entry produced by directory iteration wins; iteration order is
/// platform-defined.
///
/// A missing directory is a normal empty outcome, not an error.
pub fn find_latest_log(dir: &Path) -> Result<Option<LogFile>> {
    if !dir.is_dir() {
        tracing::info!("Log directory {} does not exist", dir.display());
        return Ok(None);
    }

    let mut latest: Option<LogFile> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(caps) = LOG_NAME_RE.captures(name) else {
            continue;
        };

        let date = match NaiveDate::parse_from_str(&caps[1], "%Y%m%d") {
            Ok(date) => date,
            Err(_) => {
                tracing::debug!("Skipping {}: not a valid calendar date", name);
                continue;
            }
        };

        if latest.as_ref().is_none_or(|best| date > best.date) {
            latest = Some(LogFile {
                path: entry.path(),
                date,
            });
        }
    }

    match &latest {
        Some(log) => tracing::debug!("Latest access log is {}", log.path.display()),
        None => tracing::info!("No access log found in {}", dir.display()),
    }

    Ok(latest)
}

/// Buffered line iterator over a plain or gzip-compressed access log.
///
/// Yields one line at a time without the trailing newline, decoding bytes
/// lossily so a stray invalid sequence cannot abort the run. The stream is
/// finite and single-pass; the file handle is released when the iterator
/// is dropped.
pub struct LogLines {
    reader: Box<dyn BufRead>,
    buf: Vec<u8>,
}

impl LogLines {
    /// Open an access log for line iteration, decompressing `.gz` files on
    /// the fly.
    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!("Opening access log: {}", path.display());

        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self {
            reader,
            buf: Vec::new(),
        })
    }
}

impl Iterator for LogLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
                    self.buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
