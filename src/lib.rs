/*!
 * # logbatch - batch work-log authoring pipeline
 *
 * A Rust library for turning free-form multi-line text into validated,
 * directory-resolved work-log records, reviewing them interactively, and
 * bulk-submitting them to a record API with partial-failure accounting.
 *
 * ## Features
 *
 * - Parse one record per line: `squad - person - type - categories - date - description`
 * - Resolve typed names against a remote directory (squads, people, log
 *   types, categories) with exact, case-insensitive matching
 * - Per-user in-memory review sessions with cursor navigation and
 *   single-field edits tracked per entry
 * - Bulk commit in review order, continuing past individual failures, with
 *   a full per-entry outcome report
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `entry`: The work-log entry data model
 * - `entry_parser`: Free text to candidate entries
 * - `directory`: Remote directory/record API clients:
 *   - `directory::http`: reqwest client for the real service
 *   - `directory::mock`: configurable mock for tests
 *   - `directory::snapshot`: one-fetch-per-run name lookups
 * - `resolver`: Name-to-id resolution against a snapshot
 * - `validator`: Parse + resolve orchestration and batch reports
 * - `session`: Per-user session storage
 * - `navigator`: Review pagination and view models
 * - `committer`: Bulk record submission
 * - `pipeline`: End-to-end facade for the hosting transport
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod committer;
pub mod directory;
pub mod entry;
pub mod entry_parser;
pub mod errors;
pub mod navigator;
pub mod pipeline;
pub mod resolver;
pub mod session;
pub mod validator;

// Re-export main types for easier usage
pub use app_config::Config;
pub use committer::CommitReport;
pub use entry::{FieldEdit, FieldTag, LogEntry};
pub use entry_parser::EntryParser;
pub use errors::{AppError, BatchError, DirectoryError, FieldError};
pub use pipeline::BatchPipeline;
pub use resolver::DirectoryResolver;
pub use session::{InMemorySessionStore, SessionStore};
pub use validator::{BatchParsingResult, BatchValidator};
