use crate::error::WalkError;

/// Identity recorded on a commit (author or committer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Name exactly as stored in the commit object, before any decoding
    pub name: Vec<u8>,
}

impl Identity {
    pub fn new(name: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into() }
    }
}

/// A commit as read from the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit SHA hash (40 characters)
    pub oid: String,
    /// Parent SHA hashes, first parent first
    pub parents: Vec<String>,
    pub author: Identity,
    pub committer: Identity,
    /// Raw message bytes
    pub message: Vec<u8>,
    /// Value of the commit's `encoding` header, if it declares one
    pub encoding: Option<String>,
}

impl Commit {
    /// First parent, if the commit has any
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// Read-only view of a commit graph
///
/// Implemented over a libgit2 repository by [`RepoGraph`](super::RepoGraph).
/// Identifiers are full hex SHAs.
pub trait CommitGraph {
    /// Resolve an identifier to a commit present in the graph
    ///
    /// Returns `None` when the identifier is unknown, which is how stale
    /// markers are detected.
    fn resolve(&self, id: &str) -> Option<String>;

    /// First parent of `id`, or `None` for a root commit
    ///
    /// Fails with [`WalkError::GraphCorrupt`] if `id` or its first parent
    /// cannot be found.
    fn first_parent(&self, id: &str) -> Result<Option<String>, WalkError>;

    /// Materialize a commit
    fn commit(&self, id: &str) -> Result<Commit, WalkError>;
}

impl<G: CommitGraph + ?Sized> CommitGraph for &G {
    fn resolve(&self, id: &str) -> Option<String> {
        (**self).resolve(id)
    }

    fn first_parent(&self, id: &str) -> Result<Option<String>, WalkError> {
        (**self).first_parent(id)
    }

    fn commit(&self, id: &str) -> Result<Commit, WalkError> {
        (**self).commit(id)
    }
}
