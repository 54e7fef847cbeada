//! Persisted Formats
//!
//! The text encodings shared by every backend. They double as the contract between
//! phases: the map step writes occurrence lists, the reduce step parses them and writes
//! count lists, the finalize step copies count lists into report lines.

use crate::protocol::types::AggregatedCount;

/// Name of the report file inside the final directory.
pub const FINAL_FILE_NAME: &str = "finalFile";

/// Separator between a word and its counts on a report line.
pub const REPORT_SEPARATOR: &str = " --- ";

/// `times` copies of `"<source> "`.
pub fn encode_occurrences(source: &str, times: usize) -> String {
    let mut encoded = String::with_capacity((source.len() + 1) * times);
    for _ in 0..times {
        encoded.push_str(source);
        encoded.push(' ');
    }
    encoded
}

/// Splits an occurrence list back into source names, ignoring the trailing separator.
pub fn decode_occurrences(text: &str) -> Vec<String> {
    text.split(' ')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"(<source>, <count>) "` for every pair, in order.
pub fn encode_counts(counts: &[AggregatedCount]) -> String {
    counts.iter().map(|pair| pair.to_string()).collect()
}

/// `"<word> --- <contents>\n"`.
pub fn report_line(word: &str, contents: &str) -> String {
    format!("{}{}{}\n", word, REPORT_SEPARATOR, contents)
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
