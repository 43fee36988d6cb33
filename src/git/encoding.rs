//! Commit text normalization to UTF-8
//!
//! Commits either declare their text encoding in an `encoding` header or
//! carry nothing, in which case the bytes are taken as ISO-8859-1. Decoding
//! is best-effort and never fails.

use super::graph::Commit;
use encoding_rs::Encoding;
use std::borrow::Cow;

/// Labels that mean true ISO-8859-1 rather than the WHATWG windows-1252 alias
const LATIN1_LABELS: &[&str] = &["iso-8859-1", "iso8859-1", "iso_8859-1", "latin1", "l1"];

/// Author, committer and message of a commit as UTF-8 text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitText {
    pub author: String,
    pub committer: String,
    pub message: String,
}

/// Normalize a commit's text fields to UTF-8
pub fn normalize(commit: &Commit) -> CommitText {
    let encoding = commit.encoding.as_deref();
    CommitText {
        author: decode(&commit.author.name, encoding),
        committer: decode(&commit.committer.name, encoding),
        message: decode(&commit.message, encoding),
    }
}

/// Decode `bytes` from the declared encoding, or ISO-8859-1 when none is declared
pub fn decode(bytes: &[u8], declared: Option<&str>) -> String {
    match declared {
        Some(label) => decode_declared(bytes, label).into_owned(),
        None => encoding_rs::mem::decode_latin1(bytes).into_owned(),
    }
}

fn decode_declared<'a>(bytes: &'a [u8], label: &str) -> Cow<'a, str> {
    let label = label.trim();
    if LATIN1_LABELS
        .iter()
        .any(|latin1| latin1.eq_ignore_ascii_case(label))
    {
        return encoding_rs::mem::decode_latin1(bytes);
    }

    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) => encoding.decode_without_bom_handling(bytes).0,
        None => {
            tracing::debug!("Unknown commit encoding '{}', decoding as UTF-8", label);
            String::from_utf8_lossy(bytes)
        }
    }
}
