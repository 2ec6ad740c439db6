/*!
 * Clients for the remote directory and record-creation API.
 *
 * This module defines the collaborator contract the batch pipeline consumes:
 * - `DirectoryApi`: read-only reference data (squads, log types, categories)
 *   plus record creation
 * - `http`: reqwest-based client for the real service
 * - `mock`: configurable in-memory implementation for tests
 * - `snapshot`: normalized name->id lookups built from one fetch pass
 */

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::entry::LogEntry;
use crate::errors::DirectoryError;

/// An `{id, name}` pair as returned by the directory listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    /// Directory id
    pub id: i64,
    /// Canonical display name
    pub name: String,
}

/// A squad with its member roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    /// Directory id
    pub id: i64,
    /// Canonical display name
    pub name: String,
    /// People belonging to this squad
    #[serde(default)]
    pub members: Vec<NamedRef>,
}

/// Body for `POST /records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Squad the record belongs to
    pub squad_id: i64,

    /// Person the record is for; omitted for whole-squad records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Log type
    pub log_type_id: i64,

    /// Categories, in input order
    pub category_ids: Vec<i64>,

    /// Free-text description
    pub description: String,

    /// ISO start date (yyyy-mm-dd)
    pub start_date: NaiveDate,

    /// ISO end date, when the record spans a range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl NewRecord {
    /// Build the wire body from a fully resolved entry. Returns `None` when
    /// the entry is missing a resolved id or a valid start date.
    pub fn from_entry(entry: &LogEntry) -> Option<Self> {
        if !entry.is_resolved() {
            return None;
        }

        Some(NewRecord {
            squad_id: entry.squad_id?,
            user_id: entry.person_id,
            log_type_id: entry.log_type_id?,
            category_ids: entry.category_ids.clone()?,
            description: entry.description.clone(),
            start_date: entry.start_date?,
            end_date: entry.end_date,
        })
    }
}

/// Common trait for directory/record API implementations
///
/// This trait defines the interface the validator and committer depend on,
/// allowing the HTTP client and the test mock to be used interchangeably.
#[async_trait]
pub trait DirectoryApi: Send + Sync + Debug {
    /// Fetch all squads with their member rosters
    ///
    /// # Returns
    /// * `Result<Vec<Squad>, DirectoryError>` - The squad list or a transport error
    async fn fetch_squads(&self) -> Result<Vec<Squad>, DirectoryError>;

    /// Fetch all log types
    async fn fetch_log_types(&self) -> Result<Vec<NamedRef>, DirectoryError>;

    /// Fetch all categories
    async fn fetch_categories(&self) -> Result<Vec<NamedRef>, DirectoryError>;

    /// Create one work-log record
    ///
    /// # Arguments
    /// * `record` - The fully resolved record body
    async fn create_record(&self, record: &NewRecord) -> Result<(), DirectoryError>;
}

pub mod http;
pub mod mock;
pub mod snapshot;
