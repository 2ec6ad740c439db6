/*!
 * Bulk submission of a reviewed batch to the record API.
 *
 * Entries are committed strictly in review order, one record call each.
 * Individual failures never abort the run and nothing is rolled back; the
 * remote API has no cross-entry transaction, so partial success is the
 * normal terminal state and the report carries every per-entry outcome.
 */

use log::{info, warn};

use crate::app_config::DisplayConfig;
use crate::directory::{DirectoryApi, NewRecord};
use crate::entry::LogEntry;

/// Per-entry outcome of a bulk commit; full counts, no truncation
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommitReport {
    /// Labels of entries whose record was created, in commit order
    pub successes: Vec<String>,

    /// `(label, error message)` for entries whose record call failed
    pub failures: Vec<(String, String)>,
}

impl CommitReport {
    /// Whether every entry committed
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total entries attempted
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Render the report for display, truncating each list to the configured
    /// caps with a `+N more` suffix. The report itself keeps full counts.
    pub fn render_summary(&self, display: &DisplayConfig) -> String {
        let mut lines = vec![format!(
            "Committed {} of {} entries",
            self.successes.len(),
            self.total()
        )];

        for label in self.successes.iter().take(display.max_shown_successes) {
            lines.push(format!("  ok: {}", label));
        }
        if self.successes.len() > display.max_shown_successes {
            lines.push(format!(
                "  +{} more",
                self.successes.len() - display.max_shown_successes
            ));
        }

        for (label, message) in self.failures.iter().take(display.max_shown_failures) {
            lines.push(format!("  failed: {} - {}", label, message));
        }
        if self.failures.len() > display.max_shown_failures {
            lines.push(format!(
                "  +{} more failed",
                self.failures.len() - display.max_shown_failures
            ));
        }

        lines.join("\n")
    }
}

/// Commit every entry in order against the record API.
///
/// Runs to completion over the list it was given, even if the owning session
/// is cleared concurrently; delivery is at-least-once and the report is the
/// caller's only accounting. Never returns early:
/// `successes.len() + failures.len() == entries.len()` for any outcome mix.
pub async fn commit_all(entries: &[LogEntry], api: &dyn DirectoryApi) -> CommitReport {
    let mut report = CommitReport::default();

    info!("Committing batch of {} entries", entries.len());

    for entry in entries {
        let label = entry.label();

        let record = match NewRecord::from_entry(entry) {
            Some(record) => record,
            None => {
                warn!("Entry '{}' is not fully resolved, skipping record call", label);
                report
                    .failures
                    .push((label, "entry is not fully resolved".to_string()));
                continue;
            }
        };

        match api.create_record(&record).await {
            Ok(()) => report.successes.push(label),
            Err(e) => {
                warn!("Record creation failed for '{}': {}", label, e);
                report.failures.push((label, e.to_string()));
            }
        }
    }

    info!(
        "Commit finished: {} succeeded, {} failed",
        report.successes.len(),
        report.failures.len()
    );

    report
}
