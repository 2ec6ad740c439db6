/*!
 * Mock directory implementations for testing.
 *
 * This module provides a mock directory API that simulates different
 * behaviors:
 * - `MockDirectory::working()` - Serves the fixture directory, creates succeed
 * - `MockDirectory::fetch_failing()` - Every directory fetch fails
 * - `MockDirectory::create_failing()` - Record creation always fails
 * - `MockDirectory::create_fail_every(n)` - Every nth creation fails
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::directory::{DirectoryApi, NamedRef, NewRecord, Squad};
use crate::errors::DirectoryError;

/// Behavior mode for the mock directory
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// All calls succeed
    Working,
    /// Directory fetches fail with a connection error (snapshot unavailable)
    FetchFailing,
    /// Directory fetches time out
    FetchTimeout,
    /// Record creation always fails with an API error
    CreateFailing,
    /// Every nth record creation fails (1-based)
    CreateFailEvery {
        /// Fail the nth, 2nth, ... creation call
        fail_every: usize,
    },
}

/// Mock directory API for exercising the pipeline without a remote service
#[derive(Debug)]
pub struct MockDirectory {
    /// Squads served by `fetch_squads`
    squads: Vec<Squad>,
    /// Log types served by `fetch_log_types`
    log_types: Vec<NamedRef>,
    /// Categories served by `fetch_categories`
    categories: Vec<NamedRef>,
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of `create_record` calls made
    create_calls: AtomicUsize,
    /// Records accepted by `create_record`, in call order
    created: Mutex<Vec<NewRecord>>,
}

impl MockDirectory {
    /// Create a mock with explicit directory data and behavior
    pub fn new(
        squads: Vec<Squad>,
        log_types: Vec<NamedRef>,
        categories: Vec<NamedRef>,
        behavior: MockBehavior,
    ) -> Self {
        Self {
            squads,
            log_types,
            categories,
            behavior,
            create_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Fixture directory with everything succeeding:
    /// squad "Alpha" (id 1) with members "Jane Doe" (9) and "John Roe" (10),
    /// squad "Gamma" (id 3) with member "Ana Lima" (11),
    /// log types "Daily" (2) / "Incident" (4),
    /// categories "Backend" (5) / "Frontend" (6) / "Infra" (7).
    pub fn working() -> Self {
        Self::new(
            standard_squads(),
            standard_log_types(),
            standard_categories(),
            MockBehavior::Working,
        )
    }

    /// Fixture directory where every fetch fails with a connection error
    pub fn fetch_failing() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), MockBehavior::FetchFailing)
    }

    /// Fixture directory where every fetch times out
    pub fn fetch_timeout() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), MockBehavior::FetchTimeout)
    }

    /// Fixture directory where record creation always fails
    pub fn create_failing() -> Self {
        Self::new(
            standard_squads(),
            standard_log_types(),
            standard_categories(),
            MockBehavior::CreateFailing,
        )
    }

    /// Fixture directory where every nth record creation fails
    pub fn create_fail_every(fail_every: usize) -> Self {
        Self::new(
            standard_squads(),
            standard_log_types(),
            standard_categories(),
            MockBehavior::CreateFailEvery { fail_every },
        )
    }

    /// Number of `create_record` calls made so far
    pub fn create_call_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Records accepted so far, in call order
    pub fn created_records(&self) -> Vec<NewRecord> {
        self.created.lock().clone()
    }

    fn fetch_guard(&self) -> Result<(), DirectoryError> {
        match self.behavior {
            MockBehavior::FetchFailing => Err(DirectoryError::ConnectionError(
                "mock directory refused the connection".to_string(),
            )),
            MockBehavior::FetchTimeout => Err(DirectoryError::Timeout(
                "mock directory did not answer in time".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DirectoryApi for MockDirectory {
    async fn fetch_squads(&self) -> Result<Vec<Squad>, DirectoryError> {
        self.fetch_guard()?;
        Ok(self.squads.clone())
    }

    async fn fetch_log_types(&self) -> Result<Vec<NamedRef>, DirectoryError> {
        self.fetch_guard()?;
        Ok(self.log_types.clone())
    }

    async fn fetch_categories(&self) -> Result<Vec<NamedRef>, DirectoryError> {
        self.fetch_guard()?;
        Ok(self.categories.clone())
    }

    async fn create_record(&self, record: &NewRecord) -> Result<(), DirectoryError> {
        let call = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;

        let should_fail = match self.behavior {
            MockBehavior::CreateFailing => true,
            MockBehavior::CreateFailEvery { fail_every } => {
                fail_every > 0 && call % fail_every == 0
            }
            _ => false,
        };

        if should_fail {
            return Err(DirectoryError::ApiError {
                status_code: 500,
                message: format!("mock create failure on call {}", call),
            });
        }

        self.created.lock().push(record.clone());
        Ok(())
    }
}

fn standard_squads() -> Vec<Squad> {
    vec![
        Squad {
            id: 1,
            name: "Alpha".to_string(),
            members: vec![
                NamedRef {
                    id: 9,
                    name: "Jane Doe".to_string(),
                },
                NamedRef {
                    id: 10,
                    name: "John Roe".to_string(),
                },
            ],
        },
        Squad {
            id: 3,
            name: "Gamma".to_string(),
            members: vec![NamedRef {
                id: 11,
                name: "Ana Lima".to_string(),
            }],
        },
    ]
}

fn standard_log_types() -> Vec<NamedRef> {
    vec![
        NamedRef {
            id: 2,
            name: "Daily".to_string(),
        },
        NamedRef {
            id: 4,
            name: "Incident".to_string(),
        },
    ]
}

fn standard_categories() -> Vec<NamedRef> {
    vec![
        NamedRef {
            id: 5,
            name: "Backend".to_string(),
        },
        NamedRef {
            id: 6,
            name: "Frontend".to_string(),
        },
        NamedRef {
            id: 7,
            name: "Infra".to_string(),
        },
    ]
}
