//! The host document API the scanner reads from.
//!
//! Every call that crosses into the host is asynchronous and may fail. The
//! scanner decides per call what a failure means; see [`ScanError`](crate::ScanError).

use async_trait::async_trait;
use ds_core::{HostError, PaintStyle, SceneNode, TextStyle, Variable, VariableCollection};

/// A page as listed by the host, before its nodes are enumerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// Page id.
    pub id: String,
    /// Page name.
    pub name: String,
}

/// The main component behind an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRef {
    /// Component id.
    pub id: String,
    /// Component name.
    pub name: String,
}

/// Read-only access to a design document.
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// Key of the open file, if saved.
    fn file_key(&self) -> Option<String>;

    /// Id of the page the user has open.
    fn current_page_id(&self) -> Option<String>;

    /// Loads every page. A failure here aborts the scan.
    async fn load_all_pages(&self) -> Result<Vec<PageRef>, HostError>;

    /// Top-level nodes of one page.
    async fn page_nodes(&self, page_id: &str) -> Result<Vec<SceneNode>, HostError>;

    /// Locally defined paint styles.
    async fn local_paint_styles(&self) -> Result<Vec<PaintStyle>, HostError>;

    /// Locally defined text styles.
    async fn local_text_styles(&self) -> Result<Vec<TextStyle>, HostError>;

    /// Locally defined variable collections.
    async fn local_variable_collections(&self) -> Result<Vec<VariableCollection>, HostError>;

    /// A variable by id; `Ok(None)` if the id is unknown.
    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, HostError>;

    /// Resolves the main component of an instance node.
    ///
    /// `Ok(None)` means the host has no main component for the instance;
    /// an error means the lookup itself failed.
    async fn main_component(&self, instance: &SceneNode) -> Result<Option<ComponentRef>, HostError>;
}
