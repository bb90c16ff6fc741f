//! Domain types for the design system scanner.
//!
//! # Module Organization
//!
//! - [`node`] - The host document tree
//! - [`paint`] - Fill and stroke paints
//! - [`style`] - Paint styles, text styles, and variables
//! - [`document`] - A complete document snapshot
//! - [`record`] - Per-component scan output
//! - [`session`] - The scan session and its catalogues
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use ds_core::{ComponentRecord, SceneNode, ScanSession};
//! ```

pub mod document;
pub mod node;
pub mod paint;
pub mod record;
pub mod session;
pub mod style;

pub use document::Document;
pub use node::{
    AutoLayout, ComponentSetNode, ContainerNode, FontName, InstanceNode, LayoutAlign, LayoutMode,
    LayoutWrap, NodeKind, NodeType, Page, SceneNode, ShapeNode, SizingMode, TextAutoResize,
    TextNode, VariantProperty,
};
pub use paint::{
    BoundVariables, ColorStop, GradientPaint, ImagePaint, Paint, PaintKind, Rgb, Rgba,
    SolidPaint, VariableAlias,
};
pub use record::{
    ColorDescriptor, ComponentRecord, ComponentSlot, GradientStopInfo, LayoutBehavior,
    LayoutDirection, LayoutSizing, Padding, PaddingEstimate, PaddingSource, PageInfo,
    SemanticRole, SlotCategory, StyleContext, TextSlot, TextSlotKind,
};
pub use session::{
    ColorCategory, ColorStyle, ColorStyles, DesignToken, ScanSession, TYPE_LOOKUP_MIN_CONFIDENCE,
    TextStyleSummary,
};
pub use style::{
    Measure, PaintStyle, TextStyle, TokenValue, Variable, VariableCollection, VariableMode,
    VariableType,
};
