//! A [`DocumentHost`] over an in-memory [`Document`] snapshot.
//!
//! # Examples
//!
//! ```
//! use ds_core::Document;
//! use ds_scanner::{DocumentHost, SnapshotHost};
//!
//! let doc: Document = serde_json::from_str(r#"{
//!     "fileKey": "abc",
//!     "pages": [{"id": "0:1", "name": "Components", "children": []}]
//! }"#).unwrap();
//!
//! let host = SnapshotHost::new(doc);
//! assert_eq!(host.file_key().as_deref(), Some("abc"));
//! ```

use async_trait::async_trait;
use camino::Utf8Path;
use ds_core::{
    Document, FxHashMap, HostError, NodeKind, PaintStyle, SceneNode, TextStyle, Variable,
    VariableCollection, fx_hash_map,
};

use crate::error::ScanError;
use crate::host::{ComponentRef, DocumentHost, PageRef};

/// Serves a captured document as if it were a live host.
#[derive(Debug, Clone)]
pub struct SnapshotHost {
    document: Document,
    /// Component id to name, across all pages.
    components: FxHashMap<String, String>,
    /// Variable id to index into `document.variables`.
    variables: FxHashMap<String, usize>,
}

impl SnapshotHost {
    /// Wraps a document and indexes its components and variables.
    #[must_use]
    pub fn new(document: Document) -> Self {
        let mut components = fx_hash_map();
        let mut stack: Vec<&SceneNode> = document
            .pages
            .iter()
            .flat_map(|page| page.children.iter())
            .collect();
        while let Some(node) = stack.pop() {
            if matches!(node.kind, NodeKind::Component(_)) {
                components.insert(node.id.clone(), node.name.clone());
            }
            stack.extend(node.children());
        }

        let variables = document
            .variables
            .iter()
            .enumerate()
            .map(|(idx, v)| (v.id.clone(), idx))
            .collect();

        Self {
            document,
            components,
            variables,
        }
    }

    /// Reads a JSON snapshot from disk.
    pub async fn from_json_file(path: &Utf8Path) -> Result<Self, ScanError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ScanError::config(format!("failed to read {path}: {e}")))?;
        let document: Document = serde_json::from_str(&raw)
            .map_err(|e| ScanError::config(format!("failed to parse {path}: {e}")))?;
        Ok(Self::new(document))
    }
}

#[async_trait]
impl DocumentHost for SnapshotHost {
    fn file_key(&self) -> Option<String> {
        self.document.file_key.clone()
    }

    fn current_page_id(&self) -> Option<String> {
        self.document.current_page_id.clone()
    }

    async fn load_all_pages(&self) -> Result<Vec<PageRef>, HostError> {
        Ok(self
            .document
            .pages
            .iter()
            .map(|page| PageRef {
                id: page.id.clone(),
                name: page.name.clone(),
            })
            .collect())
    }

    async fn page_nodes(&self, page_id: &str) -> Result<Vec<SceneNode>, HostError> {
        self.document
            .pages
            .iter()
            .find(|page| page.id == page_id)
            .map(|page| page.children.clone())
            .ok_or_else(|| HostError::PageEnumeration {
                page_id: page_id.to_owned(),
                reason: "no such page".to_owned(),
            })
    }

    async fn local_paint_styles(&self) -> Result<Vec<PaintStyle>, HostError> {
        Ok(self.document.paint_styles.clone())
    }

    async fn local_text_styles(&self) -> Result<Vec<TextStyle>, HostError> {
        Ok(self.document.text_styles.clone())
    }

    async fn local_variable_collections(&self) -> Result<Vec<VariableCollection>, HostError> {
        Ok(self.document.variable_collections.clone())
    }

    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, HostError> {
        Ok(self
            .variables
            .get(id)
            .and_then(|&idx| self.document.variables.get(idx))
            .cloned())
    }

    async fn main_component(&self, instance: &SceneNode) -> Result<Option<ComponentRef>, HostError> {
        let NodeKind::Instance(data) = &instance.kind else {
            return Err(HostError::lookup(&instance.id, "not an instance"));
        };
        let Some(main_id) = data.main_component_id.as_deref() else {
            return Ok(None);
        };
        // Library components live outside the document and keep the instance name.
        let name = self
            .components
            .get(main_id)
            .map_or_else(|| instance.name.clone(), Clone::clone);
        Ok(Some(ComponentRef {
            id: main_id.to_owned(),
            name,
        }))
    }
}
