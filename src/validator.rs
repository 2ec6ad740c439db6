/*!
 * Batch validation: parsing plus directory resolution.
 *
 * The validator owns the per-run orchestration: fetch one directory snapshot,
 * run every candidate through the resolver, and aggregate the outcome into a
 * `BatchParsingResult`. Per-field failures are collected, not thrown, so a
 * batch makes partial progress; only an unusable submission or an unreachable
 * directory rejects the whole attempt.
 */

use log::{info, warn};
use std::sync::Arc;

use crate::app_config::InputConfig;
use crate::directory::snapshot::DirectorySnapshot;
use crate::directory::DirectoryApi;
use crate::entry::{FieldTag, LogEntry};
use crate::entry_parser::EntryParser;
use crate::errors::{BatchError, FieldError};
use crate::resolver::DirectoryResolver;

/// Outcome of validating one batch of candidates
#[derive(Debug, Default)]
pub struct BatchParsingResult {
    /// Entries that resolved fully, in input order
    pub valid_entries: Vec<LogEntry>,

    /// One human-readable message per rejected candidate or skipped line,
    /// each referencing its source line number
    pub errors: Vec<String>,

    /// Count of candidates attempted, valid plus invalid
    pub total_processed: usize,
}

impl BatchParsingResult {
    /// Whether anything survived validation
    pub fn has_valid_entries(&self) -> bool {
        !self.valid_entries.is_empty()
    }
}

/// Validator orchestrating the parse -> resolve pipeline
#[derive(Debug)]
pub struct BatchValidator {
    /// Directory/record API collaborator
    directory: Arc<dyn DirectoryApi>,

    /// Free-text parser
    parser: EntryParser,

    /// Name-to-id resolver
    resolver: DirectoryResolver,
}

impl BatchValidator {
    /// Create a validator over the given directory API
    pub fn new(directory: Arc<dyn DirectoryApi>, input: &InputConfig) -> Self {
        Self {
            directory,
            parser: EntryParser::new(input),
            resolver: DirectoryResolver::new(input),
        }
    }

    /// Validate a raw text submission end to end.
    ///
    /// A submission with no parseable line at all is rejected as a format
    /// error before any remote call. Lines skipped by the parser are folded
    /// into the report's errors so they are never silently dropped.
    pub async fn validate_text(&self, text: &str) -> Result<BatchParsingResult, BatchError> {
        if !self.parser.can_parse(text) {
            return Err(BatchError::Format(
                "no line matches 'squad - person - type - categories - date - description'"
                    .to_string(),
            ));
        }

        let candidates = self.parser.parse(text);
        if candidates.is_empty() {
            return Err(BatchError::Format("no parseable entries found".to_string()));
        }

        let skipped = self.parser.skipped_lines(text);
        let mut result = self.validate_entries(candidates).await?;

        result.total_processed += skipped.len();
        result.errors.extend(skipped);

        Ok(result)
    }

    /// Validate already-parsed candidates against one directory snapshot.
    ///
    /// Exactly one snapshot is fetched per call regardless of batch size. If
    /// that fetch fails the whole call fails fast: a partial snapshot would
    /// misclassify valid names as unresolved. Guarantees
    /// `total_processed == valid_entries.len() + errors.len()`.
    pub async fn validate_entries(
        &self,
        entries: Vec<LogEntry>,
    ) -> Result<BatchParsingResult, BatchError> {
        let snapshot = DirectorySnapshot::fetch(self.directory.as_ref()).await?;

        let total_processed = entries.len();
        let mut result = BatchParsingResult {
            total_processed,
            ..BatchParsingResult::default()
        };

        for mut entry in entries {
            match self.resolver.resolve(&mut entry, &snapshot) {
                Ok(()) => result.valid_entries.push(entry),
                Err(field_errors) => {
                    let message = Self::format_entry_errors(&field_errors);
                    warn!("Rejected entry: {}", message);
                    result.errors.push(message);
                }
            }
        }

        info!(
            "Validated batch: {} valid, {} rejected of {}",
            result.valid_entries.len(),
            result.errors.len(),
            total_processed
        );

        Ok(result)
    }

    /// Re-resolve a single edited field of one entry, in place.
    ///
    /// Returns the entry's formatted error messages for that field (empty
    /// when the edit resolved cleanly). Only the edited field is touched;
    /// the one cross-field rule is that a squad edit re-scopes the person.
    pub async fn revalidate_field(
        &self,
        entry: &mut LogEntry,
        field: FieldTag,
    ) -> Result<Vec<String>, BatchError> {
        let snapshot = DirectorySnapshot::fetch(self.directory.as_ref()).await?;

        match self.resolver.resolve_field(entry, field, &snapshot) {
            Ok(()) => Ok(Vec::new()),
            Err(field_errors) => Ok(field_errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// One message per rejected candidate: a lone failure renders as
    /// `line N: <field> '<value>' not found`; several failures on the same
    /// line are joined behind a single line prefix.
    fn format_entry_errors(errors: &[FieldError]) -> String {
        match errors {
            [single] => single.to_string(),
            [first, ..] => {
                let descriptions: Vec<String> =
                    errors.iter().map(FieldError::description).collect();
                format!("line {}: {}", first.line(), descriptions.join("; "))
            }
            [] => String::new(),
        }
    }
}
