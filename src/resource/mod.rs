//! Resource actions
//!
//! Each action takes the parsed request, drives the git engine over the
//! working directory and writes its response. `check` and `get` stream
//! newline-delimited fragments to the request's `response_path`; `info` is
//! returned to the caller for printing on stdout.

use crate::config::Config;
use crate::error::ResourceError;
use crate::git::{CommitGraph, GitEngine, RepoGraph, discover};
use crate::types::{Fragment, InfoResponse, Request};
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Runs resource actions against a working directory
pub struct ResourceRunner {
    config: Config,
    engine: GitEngine,
    dir: PathBuf,
}

impl ResourceRunner {
    pub fn new(config: Config, dir: impl Into<PathBuf>) -> Self {
        let engine = GitEngine::new(&config.engine);
        Self {
            config,
            engine,
            dir: dir.into(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Report every version not yet seen since the request's `ref`
    ///
    /// Returns the number of fragments written, baseline included.
    pub fn check(&self, request: &Request) -> Result<usize, ResourceError> {
        let response_path = request.response_path("check")?;
        let source = &request.config;

        let count = ResponseWriter::stream(response_path, |writer| {
            let repo = self.timed("fetch", || self.engine.open_or_clone_bare(source, &self.dir))?;
            let graph = RepoGraph::new(&repo);
            let head = graph.head(self.engine.remote(), source.branch.as_deref())?;

            self.timed("walk", || -> Result<(), ResourceError> {
                for commit in discover(&graph, &head, source.reference.as_deref())? {
                    writer.write_fragment(&Fragment::from_commit(&commit?))?;
                }
                Ok(())
            })
        })?;

        tracing::info!("commits: {}", count);
        Ok(count)
    }

    /// Clone the repository into the working directory at the requested version
    ///
    /// Without a `ref` the branch head stays checked out.
    pub fn get(&self, request: &Request) -> Result<Fragment, ResourceError> {
        let response_path = request.response_path("get")?;
        let source = &request.config;

        let repo = self.timed("clone", || self.engine.clone_checkout(source, &self.dir))?;
        let graph = RepoGraph::new(&repo);
        let oid = match source.reference.as_deref() {
            Some(reference) => self.timed("checkout", || self.engine.checkout(&repo, reference))?,
            None => graph.head(self.engine.remote(), source.branch.as_deref())?,
        };

        let fragment = Fragment::from_commit(&graph.commit(&oid)?);
        ResponseWriter::stream(response_path, |writer| writer.write_fragment(&fragment))?;

        tracing::info!("Fetched version {}", oid);
        Ok(fragment)
    }

    /// Pushing is not supported; accept the request and do nothing
    pub fn put(&self, request: &Request) -> Result<(), ResourceError> {
        tracing::info!("putting (no-op for {})", request.config.uri);
        Ok(())
    }

    /// Capability document for the request's repository
    pub fn info(&self, request: &Request) -> InfoResponse {
        InfoResponse::new(self.config.icons.icon_for(&request.config.uri))
    }

    fn timed<T>(&self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        if self.config.diagnostics.timings {
            tracing::info!("{}: {:.3}s", label, start.elapsed().as_secs_f64());
        }
        result
    }
}

/// Newline-delimited JSON response file
///
/// Every fragment reaches the file as soon as its line is complete.
pub struct ResponseWriter {
    path: PathBuf,
    out: LineWriter<File>,
    written: usize,
}

impl ResponseWriter {
    pub fn create(path: &Path) -> Result<Self, ResourceError> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            out: LineWriter::new(file),
            written: 0,
        })
    }

    /// Create the response file, fill it with `f`, and remove it again if
    /// `f` fails
    pub fn stream<F>(path: &Path, f: F) -> Result<usize, ResourceError>
    where
        F: FnOnce(&mut ResponseWriter) -> Result<(), ResourceError>,
    {
        let mut writer = Self::create(path)?;
        match f(&mut writer) {
            Ok(()) => writer.finish(),
            Err(e) => {
                writer.discard();
                Err(e)
            }
        }
    }

    pub fn write_fragment(&mut self, fragment: &Fragment) -> Result<(), ResourceError> {
        serde_json::to_writer(&mut self.out, fragment)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and close, returning the number of fragments written
    pub fn finish(mut self) -> Result<usize, ResourceError> {
        self.out.flush()?;
        Ok(self.written)
    }

    /// Close and delete the partially written file
    pub fn discard(self) {
        let Self { path, out, written } = self;
        drop(out);
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!(
                "Removed partial response {} ({} fragments)",
                path.display(),
                written
            ),
            Err(e) => tracing::warn!(
                "Failed to remove partial response {}: {}",
                path.display(),
                e
            ),
        }
    }
}
