//! Per-scan lookup tables for paint styles, text styles, and variables.
//!
//! A [`StyleRegistry`] is built once at the start of every scan and then only
//! read. Building a new one never reuses the maps of an earlier scan, so ids
//! from a previous document state cannot leak into a new session.
//!
//! # Id forms
//!
//! Style ids may carry a mode suffix (`S:abc,12:3`). Lookups try the exact id,
//! then `<base>,`, then the bare `<base>`:
//!
//! ```
//! use ds_scanner::id_candidates;
//!
//! assert_eq!(id_candidates("S:abc,12:3"), ["S:abc,12:3", "S:abc,", "S:abc"]);
//! ```

use ds_core::{
    ColorCategory, ColorStyle, ColorStyles, DesignToken, FxHashMap, PaintStyle, Rgb, Rgba,
    TextNode, TextStyle, TextStyleSummary, TokenValue, VariableCollection, VariableType,
};
use tracing::{debug, info, warn};

use crate::color::ColorResolver;
use crate::error::ScanError;
use crate::host::DocumentHost;
use crate::stats::ScanStats;

/// Which lookup table an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// Paint style.
    Paint,
    /// Text style.
    Text,
    /// Variable.
    Variable,
}

/// Typography of a local text style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyleEntry {
    /// Style name.
    pub name: String,
    /// Font size.
    pub font_size: f64,
    /// Font family.
    pub font_family: String,
    /// Normalized weight.
    pub font_weight: FontWeightClass,
}

/// What the registry knows about a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry {
    /// Variable name.
    pub name: String,
    /// Resolved type.
    pub resolved_type: VariableType,
    /// Applicable scopes.
    pub scopes: Vec<String>,
    /// Collection name.
    pub collection: String,
}

/// Details attached to a [`RegistryEntry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryDetails<'a> {
    /// Paint styles carry only a name.
    Paint,
    /// Text style typography.
    Text(&'a TextStyleEntry),
    /// Variable details.
    Variable(&'a VariableEntry),
}

/// A resolved registry entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryEntry<'a> {
    /// The id form that matched.
    pub id: &'a str,
    /// Entry name.
    pub name: &'a str,
    /// Table the entry came from.
    pub kind: StyleKind,
    /// Kind-specific details.
    pub details: EntryDetails<'a>,
}

/// Coarse font weight used to compare text layers with text styles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontWeightClass {
    /// 300 and below.
    Light,
    /// Up to 400.
    Regular,
    /// Up to 500.
    Medium,
    /// Up to 600.
    SemiBold,
    /// Up to 700.
    Bold,
    /// Above 700.
    ExtraBold,
    /// A style name no keyword matched, kept verbatim.
    Other(String),
}

impl FontWeightClass {
    /// Classifies a numeric weight.
    #[must_use]
    pub fn from_numeric(weight: f64) -> Self {
        match weight {
            w if w <= 300.0 => Self::Light,
            w if w <= 400.0 => Self::Regular,
            w if w <= 500.0 => Self::Medium,
            w if w <= 600.0 => Self::SemiBold,
            w if w <= 700.0 => Self::Bold,
            _ => Self::ExtraBold,
        }
    }

    /// Classifies a font style name such as `Semi Bold Italic`.
    #[must_use]
    pub fn from_style_name(style: &str) -> Self {
        let folded: String = style
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        if folded.contains("extrabold") || folded.contains("black") || folded.contains("heavy") {
            Self::ExtraBold
        } else if folded.contains("semibold") || folded.contains("demibold") {
            Self::SemiBold
        } else if folded.contains("bold") {
            Self::Bold
        } else if folded.contains("medium") {
            Self::Medium
        } else if folded.contains("light") || folded.contains("thin") {
            Self::Light
        } else if folded.contains("regular") || folded.contains("normal") || folded.contains("book")
        {
            Self::Regular
        } else {
            Self::Other(style.to_owned())
        }
    }
}

/// The result of building a registry: the registry plus recovered failures.
#[derive(Debug)]
pub struct RegistryBuild {
    /// The registry.
    pub registry: StyleRegistry,
    /// Non-fatal failures met while building.
    pub errors: Vec<ScanError>,
}

/// Per-scan lookup tables and style catalogues.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    paint_styles: FxHashMap<String, String>,
    text_styles: FxHashMap<String, usize>,
    text_entries: Vec<TextStyleEntry>,
    variables: FxHashMap<String, VariableEntry>,
    color_styles: ColorStyles,
    text_summaries: Vec<TextStyleSummary>,
    design_tokens: Vec<DesignToken>,
    tokens_synthesized: bool,
}

/// Exact id, `<base>,`, then `<base>`, without duplicates.
#[must_use]
pub fn id_candidates(id: &str) -> Vec<String> {
    let base = id.split_once(',').map_or(id, |(base, _)| base);
    let mut out = vec![id.to_owned()];
    for candidate in [format!("{base},"), base.to_owned()] {
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

fn lookup<'m, V>(map: &'m FxHashMap<String, V>, id: &str) -> Option<(&'m str, &'m V)> {
    if id.is_empty() {
        return None;
    }
    id_candidates(id)
        .iter()
        .find_map(|candidate| map.get_key_value(candidate.as_str()))
        .map(|(k, v)| (k.as_str(), v))
}

/// Buckets a color style name into one of the seven categories.
#[must_use]
pub fn categorize_color_style(name: &str) -> ColorCategory {
    const RULES: [(ColorCategory, &[&str]); 6] = [
        (ColorCategory::Primary, &["primary", "brand"]),
        (ColorCategory::Secondary, &["secondary", "accent"]),
        (ColorCategory::Tertiary, &["tertiary"]),
        (
            ColorCategory::Neutral,
            &["neutral", "gray", "grey", "black", "white", "slate"],
        ),
        (
            ColorCategory::Semantic,
            &[
                "success", "error", "warning", "info", "danger", "alert", "green", "red",
                "yellow", "blue", "orange",
            ],
        ),
        (
            ColorCategory::Surface,
            &["surface", "background", "container", "backdrop", "overlay"],
        ),
    ];
    let lower = name.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(ColorCategory::Other, |(category, _)| *category)
}

/// Extracts a shade suffix from names like `primary90`, `Primary/500`, or `neutral-100`.
#[must_use]
pub fn parse_color_variant(name: &str) -> Option<String> {
    const FAMILIES: [&str; 20] = [
        "primary", "secondary", "tertiary", "neutral", "semantic", "surface", "brand", "accent",
        "gray", "grey", "success", "error", "warning", "info", "danger", "green", "red", "yellow",
        "blue", "orange",
    ];
    let lower = name.to_lowercase();
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    for family in FAMILIES {
        if let Some(rest) = lower.strip_prefix(family) {
            if is_digits(rest) {
                return Some(rest.to_owned());
            }
        }
    }

    let (head, tail) = lower.rsplit_once(['/', '-'])?;
    let head_ok = !head.is_empty()
        && !head
            .chars()
            .any(|c| c == '/' || c == '-' || c.is_ascii_digit());
    (head_ok && is_digits(tail)).then(|| tail.to_owned())
}

/// Slug used for synthesized token names: `Primary/500` becomes `primary-500`.
#[must_use]
pub fn token_slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.to_lowercase().chars() {
        if c == '/' || c.is_whitespace() {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
            continue;
        }
        in_separator = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            out.push(c);
        }
    }
    out
}

impl StyleRegistry {
    /// Builds a fresh registry from the host's local styles and variables.
    ///
    /// Never fails: unavailable sources are recorded in
    /// [`RegistryBuild::errors`] and the affected tables stay empty. When no
    /// variable yields a token, tokens are synthesized from color styles.
    pub async fn build<H>(host: &H, stats: &ScanStats) -> RegistryBuild
    where
        H: DocumentHost + ?Sized,
    {
        let mut registry = Self::default();
        let mut errors = Vec::new();

        let paint_styles = match host.local_paint_styles().await {
            Ok(styles) => styles,
            Err(e) => {
                warn!(error = %e, "Failed to read paint styles");
                errors.push(ScanError::Styles(e));
                Vec::new()
            }
        };
        for style in &paint_styles {
            registry
                .paint_styles
                .insert(style.id.clone(), style.name.clone());
        }

        match host.local_text_styles().await {
            Ok(styles) => registry.index_text_styles(styles),
            Err(e) => {
                warn!(error = %e, "Failed to read text styles");
                errors.push(ScanError::Styles(e));
            }
        }

        match host.local_variable_collections().await {
            Ok(collections) => {
                for collection in &collections {
                    registry.index_collection(host, collection).await;
                }
            }
            Err(e) => {
                warn!(error = %e, "Variables unavailable, falling back to color styles");
                errors.push(ScanError::Tokens(e));
            }
        }

        registry.color_styles = registry.build_color_catalogue(&paint_styles);

        if registry.design_tokens.is_empty() {
            registry.design_tokens = fallback_tokens(&registry.color_styles);
            registry.tokens_synthesized = true;
            stats.mark_token_fallback();
            debug!(
                tokens = registry.design_tokens.len(),
                "Synthesized design tokens from color styles"
            );
        }

        info!(
            paint_styles = registry.len(StyleKind::Paint),
            text_styles = registry.len(StyleKind::Text),
            variables = registry.len(StyleKind::Variable),
            tokens = registry.design_tokens.len(),
            "Built style registry"
        );

        RegistryBuild { registry, errors }
    }

    fn index_text_styles(&mut self, styles: Vec<TextStyle>) {
        for style in styles {
            let entry = TextStyleEntry {
                name: style.name.clone(),
                font_size: style.font_size,
                font_family: style.font_name.family.clone(),
                font_weight: FontWeightClass::from_style_name(&style.font_name.style),
            };
            self.text_styles
                .insert(style.id.clone(), self.text_entries.len());
            self.text_entries.push(entry);
            self.text_summaries.push(TextStyleSummary {
                id: style.id,
                name: style.name,
                description: Some(style.description).filter(|d| !d.is_empty()),
                font_size: style.font_size,
                font_name: style.font_name,
                line_height: style.line_height,
                letter_spacing: style.letter_spacing,
                text_case: style.text_case,
                text_decoration: style.text_decoration,
                paragraph_spacing: style.paragraph_spacing,
                paragraph_indent: style.paragraph_indent,
            });
        }
    }

    async fn index_collection<H>(&mut self, host: &H, collection: &VariableCollection)
    where
        H: DocumentHost + ?Sized,
    {
        let Some(mode) = collection.primary_mode() else {
            debug!(collection = %collection.name, "Collection has no modes");
            return;
        };
        for variable_id in &collection.variable_ids {
            let variable = match host.variable_by_id(variable_id).await {
                Ok(Some(variable)) => variable,
                Ok(None) => {
                    debug!(variable_id = %variable_id, "Variable not found");
                    continue;
                }
                Err(e) => {
                    warn!(variable_id = %variable_id, error = %e, "Failed to read variable");
                    continue;
                }
            };
            self.variables.insert(
                variable.id.clone(),
                VariableEntry {
                    name: variable.name.clone(),
                    resolved_type: variable.resolved_type,
                    scopes: variable.scopes.clone(),
                    collection: collection.name.clone(),
                },
            );
            let Some(value) = variable.values_by_mode.get(&mode.mode_id) else {
                continue;
            };
            self.design_tokens.push(DesignToken {
                id: variable.id,
                name: variable.name,
                kind: variable.resolved_type,
                value: value.clone(),
                collection: collection.name.clone(),
                mode: mode.name.clone(),
                description: Some(variable.description).filter(|d| !d.is_empty()),
            });
        }
    }

    fn build_color_catalogue(&self, paint_styles: &[PaintStyle]) -> ColorStyles {
        let resolver = ColorResolver::new(self);
        let mut catalogue = ColorStyles::default();
        for style in paint_styles {
            let Some(color_info) = style
                .paints
                .first()
                .map(|paint| resolver.resolve(paint, Some(&style.id)))
            else {
                debug!(style = %style.name, "Paint style has no paints");
                continue;
            };
            let category = categorize_color_style(&style.name);
            catalogue.bucket_mut(category).push(ColorStyle {
                id: style.id.clone(),
                name: style.name.clone(),
                description: Some(style.description.clone()).filter(|d| !d.is_empty()),
                category,
                variant: parse_color_variant(&style.name),
                color_info,
            });
        }
        catalogue
    }

    /// Paint style name for an id, trying every id form.
    #[must_use]
    pub fn paint_style_name(&self, id: &str) -> Option<&str> {
        lookup(&self.paint_styles, id).map(|(_, name)| name.as_str())
    }

    /// Variable name for an id. Variable ids carry no mode suffix.
    #[must_use]
    pub fn variable_name(&self, id: &str) -> Option<&str> {
        self.variables
            .get(id)
            .map(|entry| entry.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Text style for an id, trying every id form.
    #[must_use]
    pub fn text_style(&self, id: &str) -> Option<&TextStyleEntry> {
        lookup(&self.text_styles, id).and_then(|(_, &idx)| self.text_entries.get(idx))
    }

    /// Text style name of a text layer.
    ///
    /// Resolves `text_style_id` by id; when the id is set but unknown (a
    /// style from another file, say), falls back to the first local style
    /// with the same size, family, and weight class.
    #[must_use]
    pub fn text_style_name(&self, text: &TextNode) -> Option<&str> {
        let id = text.text_style_id.as_deref().filter(|id| !id.is_empty())?;
        if let Some(entry) = self.text_style(id) {
            return Some(&entry.name);
        }
        let size = text.font_size?;
        let font = text.font_name.as_ref()?;
        let weight = text.font_weight.map_or_else(
            || FontWeightClass::from_style_name(&font.style),
            FontWeightClass::from_numeric,
        );
        self.text_entries
            .iter()
            .find(|entry| {
                (entry.font_size - size).abs() < f64::EPSILON
                    && entry.font_family == font.family
                    && entry.font_weight == weight
            })
            .map(|entry| entry.name.as_str())
    }

    /// Generic lookup across the three tables.
    #[must_use]
    pub fn entry(&self, kind: StyleKind, id: &str) -> Option<RegistryEntry<'_>> {
        match kind {
            StyleKind::Paint => lookup(&self.paint_styles, id).map(|(key, name)| RegistryEntry {
                id: key,
                name,
                kind,
                details: EntryDetails::Paint,
            }),
            StyleKind::Text => lookup(&self.text_styles, id).and_then(|(key, &idx)| {
                let entry = self.text_entries.get(idx)?;
                Some(RegistryEntry {
                    id: key,
                    name: &entry.name,
                    kind,
                    details: EntryDetails::Text(entry),
                })
            }),
            StyleKind::Variable => {
                self.variables
                    .get_key_value(id)
                    .map(|(key, entry)| RegistryEntry {
                        id: key,
                        name: &entry.name,
                        kind,
                        details: EntryDetails::Variable(entry),
                    })
            }
        }
    }

    /// Number of entries in a table.
    #[must_use]
    pub fn len(&self, kind: StyleKind) -> usize {
        match kind {
            StyleKind::Paint => self.paint_styles.len(),
            StyleKind::Text => self.text_entries.len(),
            StyleKind::Variable => self.variables.len(),
        }
    }

    /// Color style catalogue.
    #[must_use]
    pub const fn color_styles(&self) -> &ColorStyles {
        &self.color_styles
    }

    /// Text style catalogue.
    #[must_use]
    pub fn text_summaries(&self) -> &[TextStyleSummary] {
        &self.text_summaries
    }

    /// Design token catalogue.
    #[must_use]
    pub fn design_tokens(&self) -> &[DesignToken] {
        &self.design_tokens
    }

    /// Whether the tokens were synthesized from color styles.
    #[must_use]
    pub const fn tokens_synthesized(&self) -> bool {
        self.tokens_synthesized
    }
}

fn fallback_tokens(styles: &ColorStyles) -> Vec<DesignToken> {
    ColorCategory::ALL
        .into_iter()
        .flat_map(|category| styles.bucket(category).iter().map(move |s| (category, s)))
        .map(|(category, style)| {
            let rgb = style
                .color_info
                .color
                .as_deref()
                .and_then(Rgb::from_hex)
                .unwrap_or(Rgb::BLACK);
            DesignToken {
                id: format!("fallback-{}", style.id),
                name: token_slug(&style.name),
                kind: VariableType::Color,
                value: TokenValue::Color(Rgba {
                    r: rgb.r,
                    g: rgb.g,
                    b: rgb.b,
                    a: 1.0,
                }),
                collection: format!("{}-colors", category.as_str()),
                mode: "default".to_owned(),
                description: Some(format!("Fallback token from color style: {}", style.name)),
            }
        })
        .collect()
}
