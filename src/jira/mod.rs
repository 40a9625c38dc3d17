// Jira API module.
// Cached issue lookups plus accessors for reporter, dates and comment authors.

pub mod client;
pub mod fields;

pub use client::JiraClient;
