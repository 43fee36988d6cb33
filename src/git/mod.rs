//! Git operations for the resource
//!
//! Provides clone/fetch/checkout over a working directory, the incremental
//! first-parent history walk behind version discovery, and normalization of
//! commit text to UTF-8.

/// Commit text decoding to UTF-8
pub mod encoding;
/// Clone, fetch and checkout through libgit2, plus the libgit2 commit graph
pub mod engine;
/// Commit model and the read-only graph abstraction the walker runs over
pub mod graph;
/// Incremental first-parent history walking
pub mod walker;

pub use encoding::{CommitText, normalize};
pub use engine::{GitEngine, RepoGraph};
pub use graph::{Commit, CommitGraph, Identity};
pub use walker::{Discovery, HistoryWalker, discover};
