//! Upstream repository fixtures shared by the integration tests
#![allow(dead_code)]

use anyhow::Result;
use git2::{ObjectType, Oid, Repository, Signature};
use git_resource::types::{Fragment, Request, Source};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A non-bare repository standing in for the remote, with `main` as HEAD
pub struct Upstream {
    pub dir: TempDir,
    pub repo: Repository,
}

impl Upstream {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let repo = Repository::init(dir.path())?;
        repo.set_head("refs/heads/main")?;
        Ok(Self { dir, repo })
    }

    pub fn uri(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Commit an empty tree on `branch` with the given parents
    pub fn commit_on(&self, branch: &str, message: &str, parents: &[Oid]) -> Result<Oid> {
        let sig = Signature::now("Test User", "test@example.com")?;
        let tree_id = self.repo.treebuilder(None)?.write()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parents = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid))
            .collect::<Result<Vec<_>, _>>()?;
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        let oid = self
            .repo
            .commit(None, &sig, &sig, message, &tree, &parent_refs)?;
        self.repo
            .reference(&format!("refs/heads/{}", branch), oid, true, message)?;
        Ok(oid)
    }

    pub fn commit(&self, message: &str, parents: &[Oid]) -> Result<Oid> {
        self.commit_on("main", message, parents)
    }

    /// Write a commit object from raw bytes and move `main` to it
    ///
    /// `headers` go between the committer line and the message.
    pub fn commit_raw(
        &self,
        name: &[u8],
        headers: &[u8],
        message: &[u8],
        parents: &[Oid],
    ) -> Result<Oid> {
        let tree_id = self.repo.treebuilder(None)?.write()?;

        let mut raw = format!("tree {}\n", tree_id).into_bytes();
        for parent in parents {
            raw.extend_from_slice(format!("parent {}\n", parent).as_bytes());
        }
        for role in ["author", "committer"] {
            raw.extend_from_slice(role.as_bytes());
            raw.push(b' ');
            raw.extend_from_slice(name);
            raw.extend_from_slice(b" <test@example.com> 1700000000 +0000\n");
        }
        raw.extend_from_slice(headers);
        raw.push(b'\n');
        raw.extend_from_slice(message);

        let oid = self.repo.odb()?.write(ObjectType::Commit, &raw)?;
        self.repo.reference("refs/heads/main", oid, true, "raw commit")?;
        Ok(oid)
    }

    /// A, B, C, D on `main`
    pub fn linear(&self) -> Result<[Oid; 4]> {
        let a = self.commit("A", &[])?;
        let b = self.commit("B", &[a])?;
        let c = self.commit("C", &[b])?;
        let d = self.commit("D", &[c])?;
        Ok([a, b, c, d])
    }
}

pub fn request(
    upstream: &Upstream,
    reference: Option<&str>,
    response_path: Option<&Path>,
) -> Request {
    Request {
        config: Source {
            uri: upstream.uri(),
            branch: Some("main".to_string()),
            reference: reference.map(str::to_string),
        },
        response_path: response_path.map(PathBuf::from),
    }
}

pub fn read_fragments(path: &Path) -> Result<Vec<Fragment>> {
    let content = std::fs::read_to_string(path)?;
    content
        .lines()
        .map(|line| serde_json::from_str(line).map_err(anyhow::Error::from))
        .collect()
}

pub fn refs(fragments: &[Fragment]) -> Vec<String> {
    fragments
        .iter()
        .map(|fragment| fragment.config.reference.clone())
        .collect()
}

pub fn oids(ids: &[Oid]) -> Vec<String> {
    ids.iter().map(Oid::to_string).collect()
}
