//! Document traversal for component candidates.
//!
//! [`DocumentWalker`] enumerates every page of a host document and collects
//! each COMPONENT_SET, and each COMPONENT that is not a variant of a set, in
//! depth-first pre-order.
//!
//! # Examples
//!
//! ```
//! use ds_core::SceneNode;
//! use ds_scanner::find_components;
//!
//! let page: Vec<SceneNode> = serde_json::from_str(r#"[
//!     {"id": "1", "name": "Buttons", "type": "FRAME", "children": [
//!         {"id": "2", "name": "Button", "type": "COMPONENT"}
//!     ]}
//! ]"#).unwrap();
//!
//! let found = find_components(&page);
//! assert_eq!(found[0].id, "2");
//! ```

use ds_core::{NodeKind, PageInfo, SceneNode};
use tracing::{debug, info, warn};

use crate::error::ScanError;
use crate::host::DocumentHost;
use crate::stats::ScanStats;

/// A component found by the walker, with the page it lives on.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The COMPONENT or COMPONENT_SET node, with its subtree.
    pub node: SceneNode,
    /// Page the node was found on.
    pub page: PageInfo,
}

/// Result of walking a document.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Candidates in traversal order.
    pub candidates: Vec<Candidate>,
    /// Pages that could not be enumerated.
    pub errors: Vec<ScanError>,
}

/// Walks a host document page by page.
#[derive(Debug)]
pub struct DocumentWalker<'h, H: ?Sized> {
    host: &'h H,
}

impl<'h, H> DocumentWalker<'h, H>
where
    H: DocumentHost + ?Sized,
{
    /// Creates a walker over `host`.
    #[must_use]
    pub const fn new(host: &'h H) -> Self {
        Self { host }
    }

    /// Collects component candidates from every page.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::PagesUnavailable`] if the page list cannot be
    /// loaded. A single page that fails to enumerate is skipped and reported
    /// in [`WalkOutcome::errors`].
    pub async fn collect(&self, stats: &ScanStats) -> Result<WalkOutcome, ScanError> {
        let pages = self
            .host
            .load_all_pages()
            .await
            .map_err(ScanError::PagesUnavailable)?;
        let current_page_id = self.host.current_page_id();

        let mut outcome = WalkOutcome::default();
        for page in pages {
            let nodes = match self.host.page_nodes(&page.id).await {
                Ok(nodes) => nodes,
                Err(source) => {
                    warn!(page_id = %page.id, error = %source, "Skipping page");
                    stats.increment_pages_skipped();
                    outcome.errors.push(ScanError::PageSkipped {
                        page_id: page.id,
                        source,
                    });
                    continue;
                }
            };
            stats.increment_pages_scanned();

            let found = find_components(&nodes);
            debug!(page_id = %page.id, count = found.len(), "Enumerated page");
            let info = PageInfo {
                is_current_page: current_page_id.as_deref() == Some(page.id.as_str()),
                page_name: page.name,
                page_id: page.id,
            };
            outcome
                .candidates
                .extend(found.into_iter().map(|node| Candidate {
                    node: node.clone(),
                    page: info.clone(),
                }));
        }

        info!(
            candidates = outcome.candidates.len(),
            skipped_pages = outcome.errors.len(),
            "Document walk complete"
        );
        Ok(outcome)
    }
}

/// Component candidates under `roots`, in depth-first pre-order.
///
/// Variants (COMPONENT children of a COMPONENT_SET) are not candidates;
/// their set is.
#[must_use]
pub fn find_components(roots: &[SceneNode]) -> Vec<&SceneNode> {
    let mut found = Vec::new();
    let mut stack: Vec<(&SceneNode, bool)> = roots.iter().rev().map(|node| (node, false)).collect();

    while let Some((node, parent_is_set)) = stack.pop() {
        let is_set = matches!(node.kind, NodeKind::ComponentSet(_));
        match node.kind {
            NodeKind::ComponentSet(_) => found.push(node),
            NodeKind::Component(_) if !parent_is_set => found.push(node),
            _ => {}
        }
        stack.extend(node.children().iter().rev().map(|child| (child, is_set)));
    }
    found
}
