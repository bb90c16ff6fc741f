//! Paints as the host exposes them on fills and strokes.
//!
//! Channels are normalized floats in `[0, 1]`. Hex output rounds each
//! channel to the nearest byte and is always lowercase.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Formats the color as `#rrggbb`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_core::Rgb;
    ///
    /// let c = Rgb { r: 1.0, g: 0.5, b: 0.0 };
    /// assert_eq!(c.to_hex(), "#ff8000");
    /// ```
    #[must_use]
    pub fn to_hex(self) -> String {
        let mut out = String::with_capacity(7);
        out.push('#');
        for channel in [self.r, self.g, self.b] {
            let byte = (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
            let _ = write!(out, "{byte:02x}");
        }
        out
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    ///
    /// Returns `None` for anything that is not six hex digits.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .ok()
                .map(|v| f64::from(v) / 255.0)
        };
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl From<Rgba> for Rgb {
    fn from(c: Rgba) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

fn opaque() -> f64 {
    1.0
}

fn visible() -> bool {
    true
}

/// An RGBA color with channels in `[0, 1]`. Alpha defaults to opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    #[serde(default = "opaque")]
    pub a: f64,
}

/// Reference from a paint property to a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    /// Alias kind, normally `VARIABLE_ALIAS`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Id of the bound variable.
    pub id: String,
}

/// Variables bound to the properties of a solid paint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundVariables {
    /// Variable bound to the paint color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<VariableAlias>,
}

/// A single-color paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    /// Paint color.
    pub color: Rgb,
    /// Paint opacity.
    #[serde(default = "opaque")]
    pub opacity: f64,
    /// Whether the paint is shown.
    #[serde(default = "visible")]
    pub visible: bool,
    /// Variables bound to this paint, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variables: Option<BoundVariables>,
}

impl SolidPaint {
    /// Id of the variable bound to the color, if any.
    #[must_use]
    pub fn bound_color_variable(&self) -> Option<&str> {
        self.bound_variables
            .as_ref()
            .and_then(|b| b.color.as_ref())
            .map(|alias| alias.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// One stop along a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Stop color.
    pub color: Rgba,
    /// Position along the gradient in `[0, 1]`.
    pub position: f64,
}

/// A gradient paint of any geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    /// Ordered gradient stops.
    #[serde(default)]
    pub gradient_stops: Vec<ColorStop>,
    /// Paint opacity.
    #[serde(default = "opaque")]
    pub opacity: f64,
    /// Whether the paint is shown.
    #[serde(default = "visible")]
    pub visible: bool,
}

/// An image fill. Only its opacity is of interest to the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    /// Paint opacity.
    #[serde(default = "opaque")]
    pub opacity: f64,
    /// Whether the paint is shown.
    #[serde(default = "visible")]
    pub visible: bool,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    /// Solid color.
    Solid(SolidPaint),
    /// Linear gradient.
    GradientLinear(GradientPaint),
    /// Radial gradient.
    GradientRadial(GradientPaint),
    /// Angular gradient.
    GradientAngular(GradientPaint),
    /// Diamond gradient.
    GradientDiamond(GradientPaint),
    /// Image fill.
    Image(ImagePaint),
}

/// The kind of a [`Paint`], as written into color descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    /// Solid color.
    Solid,
    /// Linear gradient.
    GradientLinear,
    /// Radial gradient.
    GradientRadial,
    /// Angular gradient.
    GradientAngular,
    /// Diamond gradient.
    GradientDiamond,
    /// Image fill.
    Image,
}

impl Paint {
    /// Returns the paint kind.
    #[must_use]
    pub const fn kind(&self) -> PaintKind {
        match self {
            Self::Solid(_) => PaintKind::Solid,
            Self::GradientLinear(_) => PaintKind::GradientLinear,
            Self::GradientRadial(_) => PaintKind::GradientRadial,
            Self::GradientAngular(_) => PaintKind::GradientAngular,
            Self::GradientDiamond(_) => PaintKind::GradientDiamond,
            Self::Image(_) => PaintKind::Image,
        }
    }

    /// Whether the paint is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        match self {
            Self::Solid(p) => p.visible,
            Self::GradientLinear(p)
            | Self::GradientRadial(p)
            | Self::GradientAngular(p)
            | Self::GradientDiamond(p) => p.visible,
            Self::Image(p) => p.visible,
        }
    }

    /// Paint opacity.
    #[must_use]
    pub const fn opacity(&self) -> f64 {
        match self {
            Self::Solid(p) => p.opacity,
            Self::GradientLinear(p)
            | Self::GradientRadial(p)
            | Self::GradientAngular(p)
            | Self::GradientDiamond(p) => p.opacity,
            Self::Image(p) => p.opacity,
        }
    }

    /// Returns `true` for image fills.
    #[inline]
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_rounds_and_pads() {
        let c = Rgb {
            r: 0.0,
            g: 4.0 / 255.0,
            b: 1.0,
        };
        assert_eq!(c.to_hex(), "#0004ff");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn test_from_hex() {
        let c = Rgb::from_hex("#ff0080").unwrap();
        assert_eq!(c.to_hex(), "#ff0080");
        assert!(Rgb::from_hex("#fff").is_none());
        assert!(Rgb::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn test_solid_paint_deserialize_with_binding() {
        let json = r#"{
            "type": "SOLID",
            "color": {"r": 1, "g": 0, "b": 0},
            "boundVariables": {"color": {"type": "VARIABLE_ALIAS", "id": "VariableID:1:2"}}
        }"#;
        let paint: Paint = serde_json::from_str(json).unwrap();
        let Paint::Solid(solid) = &paint else {
            panic!("expected a solid paint");
        };
        assert_eq!(solid.opacity, 1.0);
        assert!(solid.visible);
        assert_eq!(solid.bound_color_variable(), Some("VariableID:1:2"));
        assert_eq!(paint.kind(), PaintKind::Solid);
    }

    #[test]
    fn test_gradient_paint_deserialize() {
        let json = r#"{
            "type": "GRADIENT_RADIAL",
            "gradientStops": [
                {"color": {"r": 0, "g": 0, "b": 0, "a": 1}, "position": 0},
                {"color": {"r": 1, "g": 1, "b": 1}, "position": 1}
            ],
            "visible": false
        }"#;
        let paint: Paint = serde_json::from_str(json).unwrap();
        assert_eq!(paint.kind(), PaintKind::GradientRadial);
        assert!(!paint.is_visible());
        let Paint::GradientRadial(g) = paint else {
            panic!("expected a radial gradient");
        };
        assert_eq!(g.gradient_stops.len(), 2);
        assert_eq!(g.gradient_stops[1].color.a, 1.0);
    }

    #[test]
    fn test_paint_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&PaintKind::GradientAngular).unwrap(),
            r#""GRADIENT_ANGULAR""#
        );
    }
}
