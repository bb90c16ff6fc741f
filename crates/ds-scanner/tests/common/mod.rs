//! Shared fixtures for the scanner integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ds_core::{
    Document, HostError, PaintStyle, SceneNode, TextStyle, Variable, VariableCollection,
};
use ds_scanner::{ComponentRef, DocumentHost, PageRef, SnapshotHost};

/// Parses a document fixture.
pub fn document(json: &str) -> Document {
    serde_json::from_str(json).unwrap()
}

/// A snapshot host that fails the calls it is told to fail.
#[derive(Debug, Default)]
pub struct FaultyHost {
    inner: Option<SnapshotHost>,
    fail_pages: bool,
    fail_page_ids: Vec<String>,
    fail_variables: bool,
    fail_styles: bool,
    fail_main_components: bool,
}

impl FaultyHost {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Some(SnapshotHost::new(document)),
            ..Self::default()
        }
    }

    pub fn failing_pages(mut self) -> Self {
        self.fail_pages = true;
        self
    }

    pub fn failing_page(mut self, page_id: &str) -> Self {
        self.fail_page_ids.push(page_id.to_owned());
        self
    }

    pub fn failing_variables(mut self) -> Self {
        self.fail_variables = true;
        self
    }

    pub fn failing_styles(mut self) -> Self {
        self.fail_styles = true;
        self
    }

    pub fn failing_main_components(mut self) -> Self {
        self.fail_main_components = true;
        self
    }

    fn inner(&self) -> &SnapshotHost {
        self.inner.as_ref().unwrap()
    }
}

#[async_trait]
impl DocumentHost for FaultyHost {
    fn file_key(&self) -> Option<String> {
        self.inner().file_key()
    }

    fn current_page_id(&self) -> Option<String> {
        self.inner().current_page_id()
    }

    async fn load_all_pages(&self) -> Result<Vec<PageRef>, HostError> {
        if self.fail_pages {
            return Err(HostError::PagesUnavailable("host offline".to_owned()));
        }
        self.inner().load_all_pages().await
    }

    async fn page_nodes(&self, page_id: &str) -> Result<Vec<SceneNode>, HostError> {
        if self.fail_page_ids.iter().any(|id| id == page_id) {
            return Err(HostError::PageEnumeration {
                page_id: page_id.to_owned(),
                reason: "page failed to load".to_owned(),
            });
        }
        self.inner().page_nodes(page_id).await
    }

    async fn local_paint_styles(&self) -> Result<Vec<PaintStyle>, HostError> {
        if self.fail_styles {
            return Err(HostError::StylesUnavailable("styles locked".to_owned()));
        }
        self.inner().local_paint_styles().await
    }

    async fn local_text_styles(&self) -> Result<Vec<TextStyle>, HostError> {
        if self.fail_styles {
            return Err(HostError::StylesUnavailable("styles locked".to_owned()));
        }
        self.inner().local_text_styles().await
    }

    async fn local_variable_collections(&self) -> Result<Vec<VariableCollection>, HostError> {
        if self.fail_variables {
            return Err(HostError::VariablesUnavailable("plan limit".to_owned()));
        }
        self.inner().local_variable_collections().await
    }

    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, HostError> {
        self.inner().variable_by_id(id).await
    }

    async fn main_component(&self, instance: &SceneNode) -> Result<Option<ComponentRef>, HostError> {
        if self.fail_main_components {
            return Err(HostError::lookup(&instance.id, "library unavailable"));
        }
        self.inner().main_component(instance).await
    }
}

/// A small design system: one component set, standalone components, one
/// paint style bound to a variable, and a text style.
pub const DESIGN_SYSTEM: &str = r#"{
    "fileKey": "FILE123",
    "currentPageId": "0:1",
    "pages": [
        {"id": "0:1", "name": "Components", "children": [
            {"id": "10:1", "name": "List Item", "type": "COMPONENT_SET",
             "variantGroupProperties": {"Condition": {"values": ["1-line", "2-line"]}},
             "children": [
                {"id": "10:2", "name": "Condition=1-line", "type": "COMPONENT",
                 "width": 360, "height": 56, "layoutMode": "HORIZONTAL",
                 "primaryAxisSizingMode": "FIXED", "layoutAlign": "STRETCH",
                 "paddingTop": 8, "paddingRight": 16, "paddingBottom": 8, "paddingLeft": 16,
                 "children": [
                    {"id": "10:3", "name": "Headline", "type": "TEXT",
                     "width": 168, "fontSize": 14, "textStyleId": "T:body,",
                     "fills": [{"type": "SOLID", "color": {"r": 0.1, "g": 0.1, "b": 0.1}}],
                     "fillStyleId": "S:brand,"},
                    {"id": "10:4", "name": "Leading", "type": "INSTANCE", "mainComponentId": "20:1"}
                 ]},
                {"id": "10:5", "name": "Condition=2-line", "type": "COMPONENT",
                 "width": 360, "height": 72}
             ]},
            {"id": "11:1", "name": "Primary Button", "type": "COMPONENT",
             "width": 120, "height": 44, "layoutMode": "HORIZONTAL",
             "primaryAxisSizingMode": "AUTO", "paddingTop": 12, "paddingLeft": 24,
             "fillStyleId": "S:brand,",
             "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0.4, "b": 1},
                        "boundVariables": {"color": {"type": "VARIABLE_ALIAS", "id": "V:1"}}}]}
        ]},
        {"id": "0:2", "name": "Icons", "children": [
            {"id": "20:1", "name": "Icon/Star", "type": "COMPONENT", "width": 24, "height": 24}
        ]}
    ],
    "paintStyles": [
        {"id": "S:brand,", "name": "Primary/500",
         "paints": [{"type": "SOLID", "color": {"r": 0, "g": 0.4, "b": 1}}]},
        {"id": "S:gray,", "name": "Neutral/100",
         "paints": [{"type": "SOLID", "color": {"r": 0.96, "g": 0.96, "b": 0.96}}]}
    ],
    "textStyles": [
        {"id": "T:body,", "name": "Body/Medium", "fontSize": 14,
         "fontName": {"family": "Inter", "style": "Regular"}}
    ],
    "variableCollections": [
        {"id": "VC:1", "name": "Colors", "defaultModeId": "M:1",
         "modes": [{"modeId": "M:1", "name": "Light"}, {"modeId": "M:2", "name": "Dark"}],
         "variableIds": ["V:1"]}
    ],
    "variables": [
        {"id": "V:1", "name": "color/primary", "resolvedType": "COLOR",
         "valuesByMode": {"M:1": {"r": 0, "g": 0.4, "b": 1, "a": 1},
                          "M:2": {"r": 0.6, "g": 0.8, "b": 1, "a": 1}},
         "variableCollectionId": "VC:1"}
    ]
}"#;
