/*!
 * Data model for work-log entries.
 *
 * A `LogEntry` is created unresolved by the parser, filled in place by the
 * resolver (directory ids, canonical spellings), optionally rewritten by
 * field edits during review, and finally submitted by the committer.
 */

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used in user-facing text (input and preview)
pub const USER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Identifies one editable field of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTag {
    /// Squad (team) the record belongs to
    Squad,
    /// Person within the squad, or the whole-squad sentinel
    Person,
    /// Log type
    Type,
    /// Category list
    Categories,
    /// Free-text description
    Description,
    /// Start/end date pair
    Dates,
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Squad => "squad",
            Self::Person => "person",
            Self::Type => "type",
            Self::Categories => "category",
            Self::Description => "description",
            Self::Dates => "date",
        };
        write!(f, "{}", name)
    }
}

/// An edit command applied to one field of an entry under review
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    /// Replace the squad name (invalidates squad and person resolution)
    Squad(String),
    /// Replace the person name
    Person(String),
    /// Replace the log type name
    Type(String),
    /// Replace the category list
    Categories(Vec<String>),
    /// Replace the description text
    Description(String),
    /// Replace the date range
    Dates(NaiveDate, Option<NaiveDate>),
}

impl FieldEdit {
    /// The field this edit rewrites
    pub fn tag(&self) -> FieldTag {
        match self {
            Self::Squad(_) => FieldTag::Squad,
            Self::Person(_) => FieldTag::Person,
            Self::Type(_) => FieldTag::Type,
            Self::Categories(_) => FieldTag::Categories,
            Self::Description(_) => FieldTag::Description,
            Self::Dates(_, _) => FieldTag::Dates,
        }
    }
}

/// A single work-log record, from candidate to resolved form
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Squad name as typed, canonicalized on resolution
    pub squad_name: String,

    /// Resolved squad id
    pub squad_id: Option<i64>,

    /// Person name as typed, canonicalized on resolution
    pub person_name: String,

    /// Resolved person id; stays `None` for whole-squad entries
    pub person_id: Option<i64>,

    /// Whether the person field named the whole-squad sentinel
    pub for_whole_squad: bool,

    /// Log type name as typed, canonicalized on resolution
    pub log_type_name: String,

    /// Resolved log type id
    pub log_type_id: Option<i64>,

    /// Category names as typed, in input order
    pub category_names: Vec<String>,

    /// Resolved category ids, parallel to `category_names`
    pub category_ids: Option<Vec<i64>>,

    /// Free-text description
    pub description: String,

    /// Start date; `None` only while a date error is pending
    pub start_date: Option<NaiveDate>,

    /// Optional end date, `>= start_date` when present
    pub end_date: Option<NaiveDate>,

    /// Raw date text that failed strict parsing, if any
    pub date_error: Option<String>,

    /// 1-based line number in the submitted text, for error reporting
    pub source_line_number: usize,

    /// Fields rewritten by an explicit edit after the initial parse.
    /// Only edit operations add tags here, never parse or resolve.
    pub edited_fields: HashSet<FieldTag>,
}

impl LogEntry {
    /// Create a fresh, unresolved candidate entry
    #[allow(clippy::too_many_arguments)]
    pub fn candidate(
        squad_name: String,
        person_name: String,
        log_type_name: String,
        category_names: Vec<String>,
        description: String,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        date_error: Option<String>,
        source_line_number: usize,
    ) -> Self {
        LogEntry {
            squad_name,
            squad_id: None,
            person_name,
            person_id: None,
            for_whole_squad: false,
            log_type_name,
            log_type_id: None,
            category_names,
            category_ids: None,
            description,
            start_date,
            end_date,
            date_error,
            source_line_number,
            edited_fields: HashSet::new(),
        }
    }

    /// Whether every directory-backed field carries an id and the dates are valid
    pub fn is_resolved(&self) -> bool {
        self.squad_id.is_some()
            && (self.person_id.is_some() || self.for_whole_squad)
            && self.log_type_id.is_some()
            && self.category_ids.is_some()
            && self.start_date.is_some()
            && self.date_error.is_none()
    }

    /// Short label used in commit reports: `"squad / person"`
    pub fn label(&self) -> String {
        format!("{} / {}", self.squad_name, self.person_name)
    }

    /// Display text for the date range, `dd-mm-yyyy` joined with `a`
    pub fn dates_display(&self) -> String {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => format!(
                "{} a {}",
                start.format(USER_DATE_FORMAT),
                end.format(USER_DATE_FORMAT)
            ),
            (Some(start), None) => start.format(USER_DATE_FORMAT).to_string(),
            _ => self.date_error.clone().unwrap_or_default(),
        }
    }

    /// Whether the given field was rewritten by an explicit edit
    pub fn is_edited(&self, field: FieldTag) -> bool {
        self.edited_fields.contains(&field)
    }

    /// Apply an edit command: rewrite the field, drop its resolved id so the
    /// validator re-resolves it, and mark the field as edited.
    pub fn apply_edit(&mut self, edit: FieldEdit) {
        let tag = edit.tag();
        match edit {
            FieldEdit::Squad(name) => {
                self.squad_name = name;
                self.squad_id = None;
                // Person scope depends on the squad, so its resolution is stale too
                self.person_id = None;
                self.for_whole_squad = false;
            }
            FieldEdit::Person(name) => {
                self.person_name = name;
                self.person_id = None;
                self.for_whole_squad = false;
            }
            FieldEdit::Type(name) => {
                self.log_type_name = name;
                self.log_type_id = None;
            }
            FieldEdit::Categories(names) => {
                self.category_names = names;
                self.category_ids = None;
            }
            FieldEdit::Description(text) => {
                self.description = text;
            }
            FieldEdit::Dates(start, end) => {
                self.start_date = Some(start);
                self.end_date = end;
                self.date_error = None;
            }
        }
        self.edited_fields.insert(tag);
    }
}
