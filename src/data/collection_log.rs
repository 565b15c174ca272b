use std::collections::HashSet;

use chrono::NaiveDateTime;
use log::debug;

use super::model::CollectionTimes;
use super::names::DuplicateNames;
use crate::error::{CaryError, Result};

pub const COLLECTION_TIME_PREFIX: &str = "Collection Time:";

/// Month/day/year and 12-hour clock, e.g. `03/14/2022 10:15:00 PM`.
const COLLECTION_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Result of replaying the log section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    pub collection_times: CollectionTimes,
    /// Unique trace name of every block, in the order the blocks appear.
    pub blocks: Vec<String>,
}

/// Walk the raw text lines of an export from `start_line` on and collect the
/// collection time of every trace block.
///
/// A block starts at a line equal to one of `declared_names` (as written in
/// the header, duplicates included). Repeated names are resolved with the same
/// `.N` scheme used for the columns.
pub fn parse_log<S: AsRef<str>>(
    lines: &[S],
    start_line: usize,
    declared_names: &[String],
) -> Result<ParsedLog> {
    let declared: HashSet<&str> = declared_names.iter().map(String::as_str).collect();
    let mut names = DuplicateNames::new();
    let mut current: Option<String> = None;
    let mut parsed = ParsedLog::default();

    for (idx, line) in lines.iter().enumerate().skip(start_line) {
        let line = line.as_ref();

        if declared.contains(line) {
            let name = names.resolve(line);
            parsed.blocks.push(name.clone());
            current = Some(name);
        }

        let Some(trace) = current.as_ref() else {
            continue;
        };
        if let Some(rest) = line.strip_prefix(COLLECTION_TIME_PREFIX) {
            let time = parse_collection_time(rest).map_err(|message| CaryError::MalformedLog {
                line: idx + 1,
                message,
            })?;
            if parsed.collection_times.insert(trace.clone(), time).is_some() {
                debug!("trace '{trace}' has more than one collection time, keeping the last");
            }
        }
    }

    Ok(parsed)
}

fn parse_collection_time(text: &str) -> std::result::Result<NaiveDateTime, String> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, COLLECTION_TIME_FORMAT)
        .map_err(|e| format!("'{text}' is not a collection time: {e}"))
}
