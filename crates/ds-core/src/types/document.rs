//! A complete document snapshot.

use serde::{Deserialize, Serialize};

use super::node::Page;
use super::style::{PaintStyle, TextStyle, Variable, VariableCollection};

/// Everything the scanner reads from a host document, captured as data.
///
/// The live host exposes the same information through asynchronous calls;
/// a snapshot lets a scan run outside the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Host file key, when the document has been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,
    /// Id of the page that is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page_id: Option<String>,
    /// Pages in document order.
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Local paint styles.
    #[serde(default)]
    pub paint_styles: Vec<PaintStyle>,
    /// Local text styles.
    #[serde(default)]
    pub text_styles: Vec<TextStyle>,
    /// Local variable collections.
    #[serde(default)]
    pub variable_collections: Vec<VariableCollection>,
    /// Local variables across all collections.
    #[serde(default)]
    pub variables: Vec<Variable>,
}
