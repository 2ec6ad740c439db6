use anyhow::Result;
use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::InputConfig;
use crate::entry::{LogEntry, USER_DATE_FORMAT};

// @module: Free-text parsing into candidate log entries

/// Expected field count per line:
/// `squad - person - type - categories - date - description`
const MIN_FIELDS: usize = 6;

// @const: Field delimiter - a hyphen with whitespace on both sides, so that
// dd-mm-yyyy dates pass through intact
static FIELD_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+-\s+").unwrap());

/// Parser turning free-form multi-line text into candidate entries.
///
/// Each non-blank line is one candidate record. Parsing is pure: no I/O,
/// stable output order, and the same input always yields the same candidates.
/// Malformed lines are omitted from the candidate list; callers surface them
/// through [`EntryParser::skipped_lines`].
#[derive(Debug, Clone)]
pub struct EntryParser {
    /// Words accepted between two dates in a range segment
    range_connectives: Vec<String>,
}

impl Default for EntryParser {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl EntryParser {
    /// Create a parser from the input-format configuration
    pub fn new(input: &InputConfig) -> Self {
        EntryParser {
            range_connectives: input
                .range_connectives
                .iter()
                .map(|c| c.to_lowercase())
                .collect(),
        }
    }

    /// Cheap structural pre-check: does at least one line split into the
    /// expected field count? Distinguishes "empty/garbage submission" from
    /// "candidates present but individually invalid".
    pub fn can_parse(&self, text: &str) -> bool {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .any(|line| FIELD_DELIMITER.splitn(line.trim(), MIN_FIELDS).count() == MIN_FIELDS)
    }

    /// Parse the submitted text into candidate entries, preserving input
    /// order and 1-based source line numbers. Lines that do not split into
    /// the minimum field count are skipped, not fatal.
    pub fn parse(&self, text: &str) -> Vec<LogEntry> {
        let mut candidates = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let line_number = idx + 1;
            match self.parse_line(trimmed, line_number) {
                Some(entry) => candidates.push(entry),
                None => debug!("Skipping malformed line {}: '{}'", line_number, trimmed),
            }
        }

        candidates
    }

    /// Per-line error messages for the lines `parse` skipped. Pure like
    /// `parse`; the validator folds these into the batch report so malformed
    /// lines are never silently dropped.
    pub fn skipped_lines(&self, text: &str) -> Vec<String> {
        let mut errors = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if self.parse_line(trimmed, idx + 1).is_none() {
                errors.push(format!(
                    "line {}: expected 'squad - person - type - categories - date - description'",
                    idx + 1
                ));
            }
        }

        errors
    }

    /// Parse one line into a candidate entry. Returns `None` when the line
    /// does not split into the required fields or a required field is blank;
    /// a bad date still yields a candidate carrying the date error.
    fn parse_line(&self, line: &str, line_number: usize) -> Option<LogEntry> {
        let segments: Vec<&str> = FIELD_DELIMITER.splitn(line, MIN_FIELDS).collect();
        if segments.len() < MIN_FIELDS {
            return None;
        }

        let squad = segments[0].trim();
        let person = segments[1].trim();
        let log_type = segments[2].trim();
        let date_segment = segments[4].trim();
        let description = segments[5].trim();

        let categories = Self::split_categories(segments[3]);

        if squad.is_empty()
            || person.is_empty()
            || log_type.is_empty()
            || categories.is_empty()
            || date_segment.is_empty()
            || description.is_empty()
        {
            return None;
        }

        let (start_date, end_date, date_error) = self.parse_dates(date_segment);

        Some(LogEntry::candidate(
            squad.to_string(),
            person.to_string(),
            log_type.to_string(),
            categories,
            description.to_string(),
            start_date,
            end_date,
            date_error,
            line_number,
        ))
    }

    /// Split the category segment on commas, trimming and dropping empties
    fn split_categories(segment: &str) -> Vec<String> {
        segment
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parse the date segment: a single `dd-mm-yyyy` date, or two dates
    /// joined by a range connective. On failure the raw segment is returned
    /// as the date error and both dates stay unset.
    fn parse_dates(
        &self,
        segment: &str,
    ) -> (Option<NaiveDate>, Option<NaiveDate>, Option<String>) {
        let tokens: Vec<&str> = segment.split_whitespace().collect();

        match tokens.as_slice() {
            [single] => match Self::parse_date(single) {
                Ok(date) => (Some(date), None, None),
                Err(_) => (None, None, Some(segment.to_string())),
            },
            [start, connective, end]
                if self
                    .range_connectives
                    .iter()
                    .any(|c| c == &connective.to_lowercase()) =>
            {
                match (Self::parse_date(start), Self::parse_date(end)) {
                    (Ok(start_date), Ok(end_date)) if end_date >= start_date => {
                        (Some(start_date), Some(end_date), None)
                    }
                    // Inverted ranges land in the same error bucket as unparsable dates
                    _ => (None, None, Some(segment.to_string())),
                }
            }
            _ => (None, None, Some(segment.to_string())),
        }
    }

    /// Strict `dd-mm-yyyy` date parsing
    fn parse_date(token: &str) -> Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(token, USER_DATE_FORMAT)?)
    }
}
