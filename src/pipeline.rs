use anyhow::Result;
use log::{debug, info};
use std::sync::Arc;

use crate::app_config::{Config, DisplayConfig};
use crate::committer::{commit_all, CommitReport};
use crate::directory::DirectoryApi;
use crate::entry::FieldEdit;
use crate::errors::BatchError;
use crate::navigator::{self, PreviewViewModel};
use crate::session::SessionStore;
use crate::validator::{BatchParsingResult, BatchValidator};

// @module: End-to-end orchestration of the batch authoring flow

/// Facade tying the pipeline stages together for the hosting transport:
/// submit -> review/edit round trips -> commit.
///
/// Every method takes the acting owner id explicitly; there is no implicit
/// "current user" context. The collaborators (directory API, session store)
/// are injected so hosts and tests can substitute their own.
#[derive(Debug)]
pub struct BatchPipeline {
    /// Remote directory/record API
    directory: Arc<dyn DirectoryApi>,

    /// Per-user session storage
    store: Arc<dyn SessionStore>,

    /// Parse + resolve orchestrator
    validator: BatchValidator,

    /// Rendering caps for commit summaries
    display: DisplayConfig,
}

impl BatchPipeline {
    /// Create a pipeline over the given collaborators
    pub fn new(
        config: &Config,
        directory: Arc<dyn DirectoryApi>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            validator: BatchValidator::new(directory.clone(), &config.input),
            directory,
            store,
            display: config.display.clone(),
        }
    }

    /// The session store backing this pipeline, exposed so the host can run
    /// periodic maintenance such as reclaiming idle sessions
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Validate a text submission and open a review session over the valid
    /// entries, overwriting any prior session of the same owner. The result
    /// reports every rejected line; a session only exists afterwards when at
    /// least one entry survived.
    pub async fn submit(&self, owner: &str, text: &str) -> Result<BatchParsingResult, BatchError> {
        info!("Processing batch submission from '{}'", owner);

        let result = self.validator.validate_text(text).await?;
        self.store.set_entries(owner, result.valid_entries.clone());

        Ok(result)
    }

    /// Preview of the entry under the owner's cursor
    pub fn preview(&self, owner: &str) -> Option<PreviewViewModel> {
        let index = self.store.index(owner);
        let total = self.store.entry_count(owner);
        let entry = self.store.entry(owner, index)?;
        Some(navigator::build_preview(&entry, index, total))
    }

    /// Move the cursor forward (clamped) and return the new preview
    pub fn next(&self, owner: &str) -> Option<PreviewViewModel> {
        let total = self.store.entry_count(owner);
        let index = navigator::next_index(self.store.index(owner), total);
        self.store.set_index(owner, index);
        self.preview(owner)
    }

    /// Move the cursor backward (clamped) and return the new preview
    pub fn previous(&self, owner: &str) -> Option<PreviewViewModel> {
        let index = navigator::previous_index(self.store.index(owner));
        self.store.set_index(owner, index);
        self.preview(owner)
    }

    /// Apply a field edit to the entry under the owner's cursor and
    /// re-resolve just that field against a fresh snapshot.
    ///
    /// Returns the remaining error messages for the edited field, empty when
    /// it now resolves cleanly. The canonical entry in the session is updated
    /// either way, so the review always shows what the user typed.
    pub async fn edit(&self, owner: &str, edit: FieldEdit) -> Result<Vec<String>, BatchError> {
        let index = self.store.index(owner);
        let field = edit.tag();

        let mut entry = self
            .store
            .apply_edit(owner, index, edit)
            .ok_or_else(|| BatchError::NoSession(owner.to_string()))?;

        let errors = self.validator.revalidate_field(&mut entry, field).await?;
        self.store.replace_entry(owner, index, entry);

        debug!(
            "Edit on '{}' entry {}: field {} revalidated with {} error(s)",
            owner,
            index,
            field,
            errors.len()
        );

        Ok(errors)
    }

    /// Commit the owner's batch in review order and clear the session.
    ///
    /// The commit runs over a snapshot of the entry list taken here; it
    /// always completes every entry and returns the full per-entry report.
    pub async fn commit(&self, owner: &str) -> Result<CommitReport, BatchError> {
        let entries = self
            .store
            .entries(owner)
            .ok_or_else(|| BatchError::NoSession(owner.to_string()))?;

        let report = commit_all(&entries, self.directory.as_ref()).await;
        self.store.clear(owner);

        Ok(report)
    }

    /// Drop the owner's session without committing
    pub fn cancel(&self, owner: &str) {
        info!("Cancelling batch session for '{}'", owner);
        self.store.clear(owner);
    }

    /// Render a commit report with the configured display caps
    pub fn render_commit_summary(&self, report: &CommitReport) -> String {
        report.render_summary(&self.display)
    }
}
