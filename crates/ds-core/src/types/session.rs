//! The versioned scan session and its catalogues.

use serde::{Deserialize, Serialize};

use super::node::FontName;
use super::record::{ColorDescriptor, ComponentRecord};
use super::style::{Measure, TokenValue, VariableType};

/// Minimum confidence for a type match in [`ScanSession::component_id_for_type`].
pub const TYPE_LOOKUP_MIN_CONFIDENCE: f64 = 0.7;

/// Category a color style is bucketed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    /// Primary and brand colors.
    Primary,
    /// Secondary and accent colors.
    Secondary,
    /// Tertiary colors.
    Tertiary,
    /// Grays, black, and white.
    Neutral,
    /// Status colors.
    Semantic,
    /// Backgrounds and containers.
    Surface,
    /// Everything else.
    Other,
}

impl ColorCategory {
    /// All categories in output order.
    pub const ALL: [Self; 7] = [
        Self::Primary,
        Self::Secondary,
        Self::Tertiary,
        Self::Neutral,
        Self::Semantic,
        Self::Surface,
        Self::Other,
    ];

    /// Lowercase name as used in JSON and token collection names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Neutral => "neutral",
            Self::Semantic => "semantic",
            Self::Surface => "surface",
            Self::Other => "other",
        }
    }
}

/// A local paint style converted for the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStyle {
    /// Style id.
    pub id: String,
    /// Style name.
    pub name: String,
    /// Author description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Bucket the style falls in.
    pub category: ColorCategory,
    /// Shade suffix such as `500`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// The style's first paint.
    pub color_info: ColorDescriptor,
}

/// Color styles grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorStyles {
    /// Primary.
    #[serde(default)]
    pub primary: Vec<ColorStyle>,
    /// Secondary.
    #[serde(default)]
    pub secondary: Vec<ColorStyle>,
    /// Tertiary.
    #[serde(default)]
    pub tertiary: Vec<ColorStyle>,
    /// Neutral.
    #[serde(default)]
    pub neutral: Vec<ColorStyle>,
    /// Semantic.
    #[serde(default)]
    pub semantic: Vec<ColorStyle>,
    /// Surface.
    #[serde(default)]
    pub surface: Vec<ColorStyle>,
    /// Other.
    #[serde(default)]
    pub other: Vec<ColorStyle>,
}

impl ColorStyles {
    /// Mutable bucket for a category.
    pub fn bucket_mut(&mut self, category: ColorCategory) -> &mut Vec<ColorStyle> {
        match category {
            ColorCategory::Primary => &mut self.primary,
            ColorCategory::Secondary => &mut self.secondary,
            ColorCategory::Tertiary => &mut self.tertiary,
            ColorCategory::Neutral => &mut self.neutral,
            ColorCategory::Semantic => &mut self.semantic,
            ColorCategory::Surface => &mut self.surface,
            ColorCategory::Other => &mut self.other,
        }
    }

    /// Bucket for a category.
    #[must_use]
    pub fn bucket(&self, category: ColorCategory) -> &[ColorStyle] {
        match category {
            ColorCategory::Primary => &self.primary,
            ColorCategory::Secondary => &self.secondary,
            ColorCategory::Tertiary => &self.tertiary,
            ColorCategory::Neutral => &self.neutral,
            ColorCategory::Semantic => &self.semantic,
            ColorCategory::Surface => &self.surface,
            ColorCategory::Other => &self.other,
        }
    }

    /// Styles across all buckets in category order.
    pub fn iter(&self) -> impl Iterator<Item = &ColorStyle> {
        ColorCategory::ALL
            .into_iter()
            .flat_map(move |category| self.bucket(category).iter())
    }

    /// Total number of styles.
    #[must_use]
    pub fn len(&self) -> usize {
        ColorCategory::ALL
            .into_iter()
            .map(|category| self.bucket(category).len())
            .sum()
    }

    /// Returns `true` if every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A local text style summarized for the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleSummary {
    /// Style id.
    pub id: String,
    /// Style name.
    pub name: String,
    /// Author description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
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
    /// Paragraph indent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_indent: Option<f64>,
}

/// A design token, either read from a variable or synthesized from a color style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignToken {
    /// Variable id, or `fallback-<styleId>` for synthesized tokens.
    pub id: String,
    /// Token name.
    pub name: String,
    /// Value type.
    #[serde(rename = "type")]
    pub kind: VariableType,
    /// Value in the token's mode.
    pub value: TokenValue,
    /// Collection name.
    pub collection: String,
    /// Mode name.
    pub mode: String,
    /// Author description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The result of one scan. Immutable once built.
///
/// # Examples
///
/// ```
/// use ds_core::{ComponentRecord, ScanSession};
///
/// let session = ScanSession::new(
///     vec![ComponentRecord::basic("1:1", "Primary Button", "button", 0.9)],
///     None,
///     None,
///     None,
///     1_700_000_000_000,
///     "2.1.0",
///     None,
/// );
/// assert_eq!(session.component_id_for_type("button"), Some("1:1"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSession {
    components: Vec<ComponentRecord>,
    #[serde(default)]
    color_styles: Option<ColorStyles>,
    #[serde(default)]
    text_styles: Option<Vec<TextStyleSummary>>,
    #[serde(default)]
    design_tokens: Option<Vec<DesignToken>>,
    scan_time: u64,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_key: Option<String>,
}

impl ScanSession {
    /// Assembles a session from its parts.
    #[must_use]
    pub fn new(
        components: Vec<ComponentRecord>,
        color_styles: Option<ColorStyles>,
        text_styles: Option<Vec<TextStyleSummary>>,
        design_tokens: Option<Vec<DesignToken>>,
        scan_time: u64,
        version: impl Into<String>,
        file_key: Option<String>,
    ) -> Self {
        Self {
            components,
            color_styles,
            text_styles,
            design_tokens,
            scan_time,
            version: version.into(),
            file_key,
        }
    }

    /// Component records in traversal order.
    #[must_use]
    pub fn components(&self) -> &[ComponentRecord] {
        &self.components
    }

    /// Color style catalogue.
    #[must_use]
    pub const fn color_styles(&self) -> Option<&ColorStyles> {
        self.color_styles.as_ref()
    }

    /// Text style catalogue.
    #[must_use]
    pub fn text_styles(&self) -> Option<&[TextStyleSummary]> {
        self.text_styles.as_deref()
    }

    /// Design token catalogue.
    #[must_use]
    pub fn design_tokens(&self) -> Option<&[DesignToken]> {
        self.design_tokens.as_deref()
    }

    /// Scan time in epoch milliseconds.
    #[must_use]
    pub const fn scan_time(&self) -> u64 {
        self.scan_time
    }

    /// Schema version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Host file key.
    #[must_use]
    pub fn file_key(&self) -> Option<&str> {
        self.file_key.as_deref()
    }

    /// Best component id for a UI role.
    ///
    /// Prefers the first record classified as `suggested_type` with
    /// confidence of at least [`TYPE_LOOKUP_MIN_CONFIDENCE`], then the first
    /// record whose name contains the type.
    #[must_use]
    pub fn component_id_for_type(&self, suggested_type: &str) -> Option<&str> {
        let needle = suggested_type.to_lowercase();
        self.components
            .iter()
            .find(|c| c.suggested_type == needle && c.confidence >= TYPE_LOOKUP_MIN_CONFIDENCE)
            .or_else(|| {
                self.components
                    .iter()
                    .find(|c| c.name.to_lowercase().contains(&needle))
            })
            .map(|c| c.id.as_str())
    }
}
