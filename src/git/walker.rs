use super::graph::{Commit, CommitGraph};
use crate::error::WalkError;
use std::collections::HashSet;

/// Incremental history walker over the first-parent chain of a head commit
///
/// Yields the commits the caller has not seen since its last marker, oldest
/// first. Side branches brought in by merges are never visited.
pub struct HistoryWalker<'g, G: CommitGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: CommitGraph + ?Sized> HistoryWalker<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// Start a walk from `head`, hiding everything already reported up to `from`
    ///
    /// If `from` resolves, it is yielded first as the baseline, followed by
    /// the first-parent commits after it up to and including `head`. If it
    /// does not resolve (absent or rewritten away), the whole first-parent
    /// history of `head` is yielded.
    pub fn discover(&self, head: &str, from: Option<&str>) -> Result<Discovery<'g, G>, WalkError> {
        let head = self
            .graph
            .resolve(head)
            .ok_or_else(|| WalkError::UnresolvableHead(head.to_string()))?;

        let marker = from.and_then(|id| {
            let resolved = self.graph.resolve(id);
            if resolved.is_none() {
                tracing::debug!(
                    "Version marker {} not found in graph, walking full history",
                    id
                );
            }
            resolved
        });

        // Newest first; Discovery pops from the back
        let mut chain = Vec::new();
        let mut reached_marker = false;
        let mut cursor = Some(head);

        while let Some(id) = cursor {
            if marker.as_deref() == Some(id.as_str()) {
                reached_marker = true;
                break;
            }
            cursor = self.graph.first_parent(&id)?;
            chain.push(id);
        }

        if let Some(marker) = &marker
            && !reached_marker
        {
            // Marker is not on head's mainline: hide its own first-parent
            // ancestry and cut head's chain where the two meet
            let hidden = self.first_parent_ancestry(marker)?;
            if let Some(pos) = chain.iter().position(|id| hidden.contains(id)) {
                chain.truncate(pos);
            }
            tracing::debug!(
                "Version marker {} is off the first-parent chain, {} commits remain",
                marker,
                chain.len()
            );
        }

        tracing::debug!(
            "Discovered {} new commits (baseline: {})",
            chain.len(),
            marker.as_deref().unwrap_or("none")
        );

        Ok(Discovery {
            graph: self.graph,
            baseline: marker,
            pending: chain,
        })
    }

    fn first_parent_ancestry(&self, start: &str) -> Result<HashSet<String>, WalkError> {
        let mut seen = HashSet::new();
        let mut cursor = Some(start.to_string());
        while let Some(id) = cursor {
            cursor = self.graph.first_parent(&id)?;
            seen.insert(id);
        }
        Ok(seen)
    }
}

/// Start a walk over `graph`; see [`HistoryWalker::discover`]
pub fn discover<'g, G: CommitGraph + ?Sized>(
    graph: &'g G,
    head: &str,
    from: Option<&str>,
) -> Result<Discovery<'g, G>, WalkError> {
    HistoryWalker::new(graph).discover(head, from)
}

/// Lazy output of a walk
///
/// Holds only the pending commit identifiers; each commit is read from the
/// graph as it is yielded. Not restartable.
pub struct Discovery<'g, G: CommitGraph + ?Sized> {
    graph: &'g G,
    baseline: Option<String>,
    pending: Vec<String>,
}

impl<G: CommitGraph + ?Sized> Discovery<'_, G> {
    /// The marker commit that will be restated first, if any
    pub fn baseline(&self) -> Option<&str> {
        self.baseline.as_deref()
    }
}

impl<G: CommitGraph + ?Sized> Iterator for Discovery<'_, G> {
    type Item = Result<Commit, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.baseline.take().or_else(|| self.pending.pop())?;
        Some(self.graph.commit(&id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.pending.len() + usize::from(self.baseline.is_some());
        (len, Some(len))
    }
}

impl<G: CommitGraph + ?Sized> ExactSizeIterator for Discovery<'_, G> {}
