// Jira issue payload accessors.
// Pure extraction of reporter, dates and comment authors from an issue's JSON.

use serde_json::Value;

use crate::error::{MineError, Result};

/// Follow `path` from `value`. Absent keys and `null` are both missing.
fn lookup<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut current = value;
    for (depth, key) in path.iter().enumerate() {
        current = match current.get(key) {
            Some(Value::Null) | None => return Err(missing(&path[..=depth])),
            Some(next) => next,
        };
    }
    Ok(current)
}

fn missing(path: &[&str]) -> MineError {
    MineError::MissingField(path.join("."))
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Result<&'a str> {
    lookup(value, path)?.as_str().ok_or_else(|| missing(path))
}

/// Leading `YYYY-MM-DD` of an ISO timestamp.
pub fn date_part(timestamp: &str) -> String {
    timestamp.chars().take(10).collect()
}

/// Format a Jira user object as "Display Name (username)".
fn person(user: &Value, path: &[&str]) -> Result<String> {
    let field = |key: &str| {
        user.get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| MineError::MissingField(format!("{}.{}", path.join("."), key)))
    };
    Ok(format!("{} ({})", field("displayName")?, field("name")?))
}

pub fn reporter(issue: &Value) -> Result<String> {
    let path = ["fields", "reporter"];
    person(lookup(issue, &path)?, &path)
}

pub fn created_date(issue: &Value) -> Result<String> {
    str_at(issue, &["fields", "created"]).map(date_part)
}

pub fn resolution_date(issue: &Value) -> Result<String> {
    str_at(issue, &["fields", "resolutiondate"]).map(date_part)
}

pub fn comments(issue: &Value) -> Result<&Vec<Value>> {
    let path = ["fields", "comment", "comments"];
    lookup(issue, &path)?
        .as_array()
        .ok_or_else(|| missing(&path))
}

/// Comment at `index`, in the order Jira returns them (oldest first).
pub fn comment(issue: &Value, index: usize) -> Result<&Value> {
    comments(issue)?
        .get(index)
        .ok_or_else(|| MineError::MissingField(format!("fields.comment.comments[{}]", index)))
}

pub fn commenter(issue: &Value, index: usize) -> Result<String> {
    let entry = format!("comments[{}]", index);
    let path = ["fields", "comment", entry.as_str(), "author"];
    let author = lookup(comment(issue, index)?, &["author"]).map_err(|_| missing(&path))?;
    person(author, &path)
}

pub fn commenting_date(issue: &Value, index: usize) -> Result<String> {
    let entry = format!("comments[{}]", index);
    str_at(comment(issue, index)?, &["created"])
        .map(date_part)
        .map_err(|_| missing(&["fields", "comment", entry.as_str(), "created"]))
}

pub fn all_commenters(issue: &Value) -> Result<Vec<String>> {
    (0..comments(issue)?.len())
        .map(|index| commenter(issue, index))
        .collect()
}

pub fn last_commenting_date(issue: &Value) -> Result<String> {
    match comments(issue)?.len() {
        0 => Err(MineError::MissingField("fields.comment.comments[-1]".to_string())),
        len => commenting_date(issue, len - 1),
    }
}
