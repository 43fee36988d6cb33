use super::graph::{Commit, CommitGraph, Identity};
use crate::config::EngineConfig;
use crate::error::{GitError, WalkError};
use crate::types::Source;
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{FetchOptions, Oid, RemoteCallbacks, Repository};
use std::path::Path;

/// Clone, fetch and checkout over a working directory using libgit2
#[derive(Debug, Clone)]
pub struct GitEngine {
    remote: String,
    show_progress: bool,
}

impl GitEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            remote: config.remote.clone(),
            show_progress: config.show_progress,
        }
    }

    /// Name of the remote this engine clones as and fetches from
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Open the bare repository in `dir` and fetch, or bare-clone into it
    ///
    /// A `HEAD` file in `dir` means a previous invocation already cloned.
    pub fn open_or_clone_bare(&self, source: &Source, dir: &Path) -> Result<Repository, GitError> {
        if dir.join("HEAD").exists() {
            let repo = Repository::open(dir).map_err(|e| GitError::OpenFailed {
                path: dir.display().to_string(),
                reason: e.message().to_string(),
            })?;
            tracing::info!("Opened existing repository at: {}", dir.display());
            self.fetch(&repo)?;
            Ok(repo)
        } else {
            self.clone_into(source, dir, true)
        }
    }

    /// Clone `source` into `dir` with a working tree checked out
    pub fn clone_checkout(&self, source: &Source, dir: &Path) -> Result<Repository, GitError> {
        self.clone_into(source, dir, false)
    }

    /// Fetch the configured remote's default refspecs
    pub fn fetch(&self, repo: &Repository) -> Result<(), GitError> {
        let mut remote = repo
            .find_remote(&self.remote)
            .map_err(|_| GitError::RemoteNotFound(self.remote.clone()))?;

        let mut fetch_options = self.fetch_options(repo.config().ok());
        remote
            .fetch(&[] as &[&str], Some(&mut fetch_options), None)
            .map_err(|e| GitError::FetchFailed {
                remote: self.remote.clone(),
                reason: e.message().to_string(),
            })?;

        let stats = remote.stats();
        tracing::info!(
            "Fetched {} objects from {}",
            stats.received_objects(),
            self.remote
        );
        Ok(())
    }

    /// Force-checkout `revision` and detach HEAD on it, returning the commit SHA
    pub fn checkout(&self, repo: &Repository, revision: &str) -> Result<String, GitError> {
        let commit = repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| GitError::RevisionNotFound(revision.to_string()))?;

        let mut checkout = CheckoutBuilder::new();
        checkout.force();

        repo.checkout_tree(commit.as_object(), Some(&mut checkout))
            .and_then(|_| repo.set_head_detached(commit.id()))
            .map_err(|e| GitError::CheckoutFailed {
                revision: revision.to_string(),
                reason: e.message().to_string(),
            })?;

        tracing::info!("Checked out {} at {}", revision, commit.id());
        Ok(commit.id().to_string())
    }

    fn clone_into(&self, source: &Source, dir: &Path, bare: bool) -> Result<Repository, GitError> {
        tracing::info!(
            "Cloning {} into {} (bare: {}, branch: {})",
            source.uri,
            dir.display(),
            bare,
            source.branch.as_deref().unwrap_or("default")
        );

        let mut builder = RepoBuilder::new();
        builder.bare(bare);
        if let Some(branch) = source.branch.as_deref() {
            builder.branch(branch);
        }

        let remote_name = self.remote.clone();
        builder.remote_create(move |repo, _name, url| repo.remote(&remote_name, url));
        builder.fetch_options(self.fetch_options(git2::Config::open_default().ok()));

        builder
            .clone(&source.uri, dir)
            .map_err(|e| GitError::CloneFailed {
                uri: source.uri.clone(),
                reason: e.message().to_string(),
            })
    }

    fn fetch_options(&self, cfg: Option<git2::Config>) -> FetchOptions<'static> {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed| {
            if allowed.is_ssh_key()
                && let Some(user) = username_from_url
            {
                return git2::Cred::ssh_key_from_agent(user);
            }
            if allowed.is_user_pass_plaintext()
                && let Some(ref cfg) = cfg
                && let Ok(cred) = git2::Cred::credential_helper(cfg, url, username_from_url)
            {
                return Ok(cred);
            }
            git2::Cred::default()
        });

        if self.show_progress {
            callbacks.transfer_progress(|stats| {
                if stats.received_objects() == stats.total_objects() || stats.received_objects() % 500 == 0 {
                    tracing::debug!(
                        "Received {}/{} objects ({} bytes)",
                        stats.received_objects(),
                        stats.total_objects(),
                        stats.received_bytes()
                    );
                }
                true
            });
        }

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);
        fetch_options
    }
}

/// [`CommitGraph`] over a libgit2 repository
pub struct RepoGraph<'r> {
    repo: &'r Repository,
}

impl<'r> RepoGraph<'r> {
    pub fn new(repo: &'r Repository) -> Self {
        Self { repo }
    }

    /// Resolve the head commit to walk from
    ///
    /// With a branch, the remote-tracking ref wins over the local branch,
    /// which a fetch into a bare clone does not move.
    pub fn head(&self, remote: &str, branch: Option<&str>) -> Result<String, WalkError> {
        let candidates = match branch {
            Some(branch) => vec![
                format!("refs/remotes/{}/{}", remote, branch),
                format!("refs/heads/{}", branch),
            ],
            None => vec![format!("refs/remotes/{}/HEAD", remote), "HEAD".to_string()],
        };

        for name in &candidates {
            if let Ok(commit) = self
                .repo
                .find_reference(name)
                .and_then(|reference| reference.peel_to_commit())
            {
                tracing::debug!("Resolved head {} to {}", name, commit.id());
                return Ok(commit.id().to_string());
            }
        }

        Err(WalkError::UnresolvableHead(candidates.join(", ")))
    }

    fn find(&self, id: &str) -> Result<git2::Commit<'r>, WalkError> {
        Oid::from_str(id)
            .and_then(|oid| self.repo.find_commit(oid))
            .map_err(|e| WalkError::GraphCorrupt {
                commit: id.to_string(),
                reason: e.message().to_string(),
            })
    }
}

impl CommitGraph for RepoGraph<'_> {
    fn resolve(&self, id: &str) -> Option<String> {
        let oid = Oid::from_str(id).ok()?;
        self.repo
            .find_commit(oid)
            .ok()
            .map(|commit| commit.id().to_string())
    }

    fn first_parent(&self, id: &str) -> Result<Option<String>, WalkError> {
        let commit = self.find(id)?;
        if commit.parent_count() == 0 {
            return Ok(None);
        }

        let parent_id = commit.parent_id(0).map_err(|e| WalkError::GraphCorrupt {
            commit: id.to_string(),
            reason: e.message().to_string(),
        })?;

        self.repo
            .find_commit(parent_id)
            .map_err(|e| WalkError::GraphCorrupt {
                commit: id.to_string(),
                reason: format!("first parent {} missing: {}", parent_id, e.message()),
            })?;

        Ok(Some(parent_id.to_string()))
    }

    fn commit(&self, id: &str) -> Result<Commit, WalkError> {
        let commit = self.find(id)?;
        Ok(Commit {
            oid: commit.id().to_string(),
            parents: commit.parent_ids().map(|oid| oid.to_string()).collect(),
            author: Identity::new(commit.author().name_bytes()),
            committer: Identity::new(commit.committer().name_bytes()),
            message: commit.message_bytes().to_vec(),
            encoding: commit.message_encoding().map(str::to_string),
        })
    }
}
