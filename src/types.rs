use crate::error::ProtocolError;
use crate::git::{Commit, normalize};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Interface version reported by the `info` action
pub const INTERFACE_VERSION: &str = "2.0";

/// Repository location and version marker from the request's `config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Repository URI to clone
    pub uri: String,
    /// Branch to track (remote default branch when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Last reported commit for `check`, commit to fetch for `get`
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Request document read from stdin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub config: Source,
    /// File the response stream is written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_path: Option<PathBuf>,
}

impl Request {
    /// Read and parse the whole request document
    pub fn from_reader(mut reader: impl Read) -> Result<Self, ProtocolError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| ProtocolError::InvalidRequest(e.to_string()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ProtocolError> {
        if content.trim().is_empty() {
            return Err(ProtocolError::EmptyRequest);
        }
        serde_json::from_str(content).map_err(|e| ProtocolError::InvalidRequest(e.to_string()))
    }

    /// The response path, which `action` cannot run without
    pub fn response_path(&self, action: &str) -> Result<&Path, ProtocolError> {
        self.response_path
            .as_deref()
            .ok_or_else(|| ProtocolError::MissingResponsePath(action.to_string()))
    }
}

/// Version identifier inside a fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRef {
    #[serde(rename = "ref")]
    pub reference: String,
}

/// One `{name, value}` metadata entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub name: String,
    pub value: String,
}

impl MetadataField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Externally visible projection of a commit, one JSON line per version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub config: VersionRef,
    pub metadata: Vec<MetadataField>,
}

impl Fragment {
    /// Project a commit, normalizing its text fields to UTF-8
    pub fn from_commit(commit: &Commit) -> Self {
        let text = normalize(commit);
        Self {
            config: VersionRef {
                reference: commit.oid.clone(),
            },
            metadata: vec![
                MetadataField::new("author", text.author),
                MetadataField::new("committer", text.committer),
                MetadataField::new("message", text.message),
            ],
        }
    }

    /// Look up a metadata value by name
    pub fn metadata_value(&self, name: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

/// Commands the orchestrator runs for each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoActions {
    pub check: String,
    pub get: String,
    pub put: String,
}

impl Default for InfoActions {
    fn default() -> Self {
        Self {
            check: "git-resource check".to_string(),
            get: "git-resource get".to_string(),
            put: "git-resource put".to_string(),
        }
    }
}

/// Capability document printed by the `info` action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub interface_version: String,
    pub icon: String,
    pub actions: InfoActions,
}

impl InfoResponse {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            interface_version: INTERFACE_VERSION.to_string(),
            icon: icon.into(),
            actions: InfoActions::default(),
        }
    }
}
