/// Integration tests for `get`, `put` and `info`
mod common;

use anyhow::Result;
use common::{Upstream, read_fragments, request};
use git2::Repository;
use git_resource::config::Config;
use git_resource::error::{GitError, ProtocolError, ResourceError};
use git_resource::resource::ResourceRunner;
use git_resource::types::Request;
use tempfile::TempDir;

#[test]
fn test_get_checks_out_requested_ref() -> Result<()> {
    let upstream = Upstream::new()?;
    let [a, b, ..] = upstream.linear()?;
    let work = TempDir::new()?;
    let dest = work.path().join("repo");
    let response = work.path().join("response");

    let b_ref = b.to_string();
    let runner = ResourceRunner::new(Config::default(), &dest);
    let fragment = runner.get(&request(&upstream, Some(&b_ref), Some(&response)))?;

    assert_eq!(fragment.config.reference, b_ref);
    assert_eq!(fragment.metadata_value("message"), Some("B"));

    let repo = Repository::open(&dest)?;
    assert!(!repo.is_bare());
    assert!(repo.head_detached()?);
    assert_eq!(repo.head()?.target(), Some(b));
    assert_ne!(repo.head()?.target(), Some(a));

    assert_eq!(read_fragments(&response)?, vec![fragment]);
    Ok(())
}

#[test]
fn test_get_without_ref_stays_on_branch_head() -> Result<()> {
    let upstream = Upstream::new()?;
    let [.., d] = upstream.linear()?;
    let work = TempDir::new()?;
    let response = work.path().join("response");

    let runner = ResourceRunner::new(Config::default(), work.path().join("repo"));
    let fragment = runner.get(&request(&upstream, None, Some(&response)))?;

    assert_eq!(fragment.config.reference, d.to_string());
    assert_eq!(read_fragments(&response)?.len(), 1);
    Ok(())
}

#[test]
fn test_get_unknown_ref_fails_without_response() -> Result<()> {
    let upstream = Upstream::new()?;
    upstream.linear()?;
    let work = TempDir::new()?;
    let response = work.path().join("response");

    let runner = ResourceRunner::new(Config::default(), work.path().join("repo"));
    let missing = "0123456789abcdef0123456789abcdef01234567";
    let result = runner.get(&request(&upstream, Some(missing), Some(&response)));

    assert!(matches!(
        result,
        Err(ResourceError::Git(GitError::RevisionNotFound(_)))
    ));
    assert!(!response.exists());
    Ok(())
}

#[test]
fn test_get_requires_response_path() -> Result<()> {
    let upstream = Upstream::new()?;
    upstream.linear()?;
    let work = TempDir::new()?;
    let dest = work.path().join("repo");

    let runner = ResourceRunner::new(Config::default(), &dest);
    let result = runner.get(&request(&upstream, None, None));

    assert!(matches!(
        result,
        Err(ResourceError::Protocol(ProtocolError::MissingResponsePath(_)))
    ));
    assert!(!dest.exists());
    Ok(())
}

#[test]
fn test_put_accepts_request() -> Result<()> {
    let work = TempDir::new()?;
    let runner = ResourceRunner::new(Config::default(), work.path());
    let req = Request::parse(r#"{"config": {"uri": "https://example.com/repo.git"}}"#)?;

    runner.put(&req)?;
    Ok(())
}

#[test]
fn test_info_document() -> Result<()> {
    let runner = ResourceRunner::new(Config::default(), ".");
    let req = Request::parse(r#"{"config": {"uri": "https://github.com/org/repo.git"}}"#)?;

    let json = serde_json::to_value(runner.info(&req))?;
    assert_eq!(
        json,
        serde_json::json!({
            "interface_version": "2.0",
            "icon": "github-circle",
            "actions": {
                "check": "git-resource check",
                "get": "git-resource get",
                "put": "git-resource put"
            }
        })
    );
    Ok(())
}
