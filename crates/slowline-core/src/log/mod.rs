mod parse;
mod source;

pub use parse::{ParsedLine, parse_line};
pub use source::{LogFile, LogLines, find_latest_log};
