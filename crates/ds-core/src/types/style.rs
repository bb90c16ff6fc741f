//! Globally defined styles and variables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::node::FontName;
use super::paint::{Paint, Rgba, VariableAlias};

/// A named paint style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaintStyle {
    /// Style id, possibly carrying a `,<mode>` suffix.
    pub id: String,
    /// Style name such as `Primary/500`.
    pub name: String,
    /// Author description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Paints making up the style.
    #[serde(default)]
    pub paints: Vec<Paint>,
}

/// A typographic measure such as line height or letter spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Magnitude; absent for `AUTO`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Unit such as `PIXELS`, `PERCENT`, or `AUTO`.
    pub unit: String,
}

/// A named text style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Style id.
    pub id: String,
    /// Style name such as `Body/Large`.
    pub name: String,
    /// Author description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Font size.
    pub font_size: f64,
    /// Font family and style.
    pub font_name: FontName,
    /// Line height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Measure>,
    /// Letter spacing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<Measure>,
    /// Text case transform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
    /// Text decoration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    /// Space between paragraphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    /// First-line paragraph indent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_indent: Option<f64>,
}

/// The type a variable resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    /// A color.
    Color,
    /// A number.
    Float,
    /// A string.
    String,
    /// A boolean.
    Boolean,
}

/// A mode of a variable collection, such as `Light` or `Dark`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    /// Mode id.
    pub mode_id: String,
    /// Mode name.
    pub name: String,
}

/// A named group of variables sharing a set of modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    /// Collection id.
    pub id: String,
    /// Collection name.
    pub name: String,
    /// Modes in declaration order.
    #[serde(default)]
    pub modes: Vec<VariableMode>,
    /// Default mode id.
    #[serde(default)]
    pub default_mode_id: String,
    /// Ids of the variables in this collection.
    #[serde(default)]
    pub variable_ids: Vec<String>,
}

impl VariableCollection {
    /// The default mode, falling back to the first declared mode.
    #[must_use]
    pub fn primary_mode(&self) -> Option<&VariableMode> {
        self.modes
            .iter()
            .find(|m| m.mode_id == self.default_mode_id)
            .or_else(|| self.modes.first())
    }
}

/// A variable value for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Reference to another variable.
    Alias(VariableAlias),
    /// Color value.
    Color(Rgba),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// String value.
    Text(String),
}

/// A design token variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Variable id.
    pub id: String,
    /// Variable name such as `color/primary/500`.
    pub name: String,
    /// Resolved type.
    pub resolved_type: VariableType,
    /// Values keyed by mode id.
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, TokenValue>,
    /// Scopes the variable may be applied to.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Author description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Owning collection id.
    #[serde(default)]
    pub variable_collection_id: String,
}
