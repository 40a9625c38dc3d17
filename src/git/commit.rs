// Commit records read from git history.
// Parses the machine-readable `git log` format used by the repository reader.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::{MineError, Result};

/// `git log` format: fields split by US (0x1f), records terminated by RS (0x1e).
pub(crate) const LOG_FORMAT: &str = "--format=%H%x1f%an%x1f%ae%x1f%aI%x1f%B%x1e";

const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';

/// A commit as read from the local clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub hash: String,
    pub author_name: String,
    pub author_email: String,
    pub author_date: DateTime<FixedOffset>,
    pub msg: String,
}

impl Commit {
    /// Author as "Name (email)".
    pub fn author(&self) -> String {
        format!("{} ({})", self.author_name, self.author_email)
    }

    /// Author date as YYYY-MM-DD in the commit's own offset.
    pub fn date(&self) -> String {
        self.author_date.format("%Y-%m-%d").to_string()
    }
}

/// Parse the output of `git log` run with [`LOG_FORMAT`].
pub(crate) fn parse_log(output: &str) -> Result<Vec<Commit>> {
    output
        .split(RECORD_SEP)
        .map(|record| record.trim_start_matches(['\n', '\r']))
        .filter(|record| !record.trim().is_empty())
        .map(parse_record)
        .collect()
}

fn parse_record(record: &str) -> Result<Commit> {
    let fields: Vec<&str> = record.splitn(5, FIELD_SEP).collect();
    let [hash, name, email, date, msg] = fields[..] else {
        return Err(MineError::Git(format!("malformed log record: {:?}", record)));
    };

    let author_date = DateTime::parse_from_rfc3339(date)
        .map_err(|e| MineError::Git(format!("bad author date {:?} for {}: {}", date, hash, e)))?;

    Ok(Commit {
        hash: hash.to_string(),
        author_name: name.to_string(),
        author_email: email.to_string(),
        author_date,
        msg: msg.trim_end_matches(['\n', '\r']).to_string(),
    })
}
