/*!
 * Common test utilities for the logbatch test suite
 */

#![allow(dead_code)]

use chrono::NaiveDate;

use logbatch::directory::snapshot::DirectorySnapshot;
use logbatch::directory::{NamedRef, Squad};
use logbatch::entry::LogEntry;

/// Initialize logging for tests that want pipeline log output. Honors
/// `RUST_LOG`; safe to call from every test, only the first call takes.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One well-formed input line matching the standard directory fixture
pub const SAMPLE_LINE: &str =
    "Alpha - Jane Doe - Daily - Backend, Frontend - 15-01-2025 - standup notes";

/// Directory data mirroring `MockDirectory::working()`:
/// squad "Alpha" (1) with "Jane Doe" (9) and "John Roe" (10),
/// squad "Gamma" (3) with "Ana Lima" (11),
/// log types "Daily" (2) / "Incident" (4),
/// categories "Backend" (5) / "Frontend" (6) / "Infra" (7).
pub fn standard_directory() -> (Vec<Squad>, Vec<NamedRef>, Vec<NamedRef>) {
    let squads = vec![
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
    ];

    let log_types = vec![
        NamedRef {
            id: 2,
            name: "Daily".to_string(),
        },
        NamedRef {
            id: 4,
            name: "Incident".to_string(),
        },
    ];

    let categories = vec![
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
    ];

    (squads, log_types, categories)
}

/// Snapshot over the standard directory, for synchronous resolver tests
pub fn standard_snapshot() -> DirectorySnapshot {
    let (squads, log_types, categories) = standard_directory();
    DirectorySnapshot::new(squads, log_types, categories)
}

/// An unresolved candidate matching the standard directory fixture
pub fn sample_candidate() -> LogEntry {
    LogEntry::candidate(
        "Alpha".to_string(),
        "Jane Doe".to_string(),
        "Daily".to_string(),
        vec!["Backend".to_string(), "Frontend".to_string()],
        "standup notes".to_string(),
        NaiveDate::from_ymd_opt(2025, 1, 15),
        None,
        None,
        1,
    )
}

/// A fully resolved entry for committer tests, distinguishable by `seq`
pub fn resolved_entry(seq: usize) -> LogEntry {
    let mut entry = LogEntry::candidate(
        "Alpha".to_string(),
        format!("Person {}", seq),
        "Daily".to_string(),
        vec!["Backend".to_string()],
        format!("work item {}", seq),
        NaiveDate::from_ymd_opt(2025, 1, seq as u32),
        None,
        None,
        seq,
    );
    entry.squad_id = Some(1);
    entry.person_id = Some(100 + seq as i64);
    entry.log_type_id = Some(2);
    entry.category_ids = Some(vec![5]);
    entry
}
