//! # git-resource - Git version resource for pull-based CI
//!
//! A resource plugin an orchestrator runs as a subprocess with a JSON request
//! on stdin. It reports new commits on a branch (`check`), materializes a
//! commit into a working directory (`get`), accepts pushes as a no-op
//! (`put`) and describes itself (`info`).
//!
//! ## Version discovery
//!
//! `check` walks the first-parent chain of the branch head and emits every
//! commit newer than the last reported one, oldest first, restating the last
//! reported commit as a baseline. A marker the repository no longer contains
//! degrades to the full first-parent history. Merge side branches are never
//! reported.
//!
//! ```text
//! stdin request ─▶ ResourceRunner ─▶ GitEngine (clone / fetch)
//!                        │
//!                        ▼
//!                  HistoryWalker over RepoGraph
//!                        │
//!                        ▼
//!              response_path (one Fragment per line)
//! ```
//!
//! ## Modules
//!
//! - [`git`]: Engine adapter, commit graph, history walker, text decoding
//! - [`resource`]: Action runner and response stream
//! - [`types`]: Request, fragment and info documents
//! - [`config`]: Configuration management with environment variable support
//! - [`error`]: Error types
//! - [`paths`]: Platform-specific config locations
//!
//! ## Usage Example
//!
//! ```no_run
//! use git_resource::config::Config;
//! use git_resource::resource::ResourceRunner;
//! use git_resource::types::Request;
//!
//! fn main() -> anyhow::Result<()> {
//!     let request = Request::from_reader(std::io::stdin().lock())?;
//!     let runner = ResourceRunner::new(Config::new()?, ".");
//!     let count = runner.check(&request)?;
//!     eprintln!("commits: {}", count);
//!     Ok(())
//! }
//! ```

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Git engine, commit graph and incremental history walking
pub mod git;

/// Platform-specific config paths
pub mod paths;

/// Resource actions and the response stream
pub mod resource;

/// Request and response documents
pub mod types;
