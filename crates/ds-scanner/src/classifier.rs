//! Maps component names to UI roles.
//!
//! Names are lowercased, then tested against a table of role patterns.
//! Compound roles are tried first so that `icon-button` is never shadowed by
//! `icon` or `button`, and `list-item` never by `list`. Roles outside the
//! priority list are then tried in table order.
//!
//! ```
//! use ds_scanner::classify;
//!
//! assert_eq!(classify("Button"), ("button", 0.95));
//! assert_eq!(classify("Primary Button"), ("button", 0.90));
//! assert_eq!(classify("icon-button-primary").0, "icon-button");
//! assert_eq!(classify("xyz123"), ("unknown", 0.10));
//! ```

use std::sync::LazyLock;

use ds_core::{SemanticRole, SlotCategory};
use regex::Regex;

/// Role reported when no pattern matches.
pub const UNKNOWN_ROLE: &str = "unknown";

/// Confidence for a name equal to its role.
pub const EXACT_CONFIDENCE: f64 = 0.95;
/// Confidence for a name containing its role.
pub const CONTAINS_CONFIDENCE: f64 = 0.90;
/// Confidence for a name containing its role once separators are folded.
pub const FOLDED_CONFIDENCE: f64 = 0.85;
/// Confidence for a pattern-only match.
pub const PATTERN_CONFIDENCE: f64 = 0.70;
/// Confidence for an unknown role.
pub const UNKNOWN_CONFIDENCE: f64 = 0.10;

/// A keyword that only counts when not followed by a suffix.
type Guard = Option<(&'static str, &'static str)>;

/// Role patterns in table order.
const TABLE: &[(&str, &str, Guard)] = &[
    ("icon-button", r"icon.*button|button.*icon", None),
    ("upload", r"upload|file.*drop|drop.*zone|attach", None),
    ("form", r"form|captcha|verification", None),
    (
        "context-menu",
        r"context-menu|context menu|contextual menu|options menu",
        None,
    ),
    (
        "modal-header",
        r"modal-header|modal header|modalstack|modal_stack",
        None,
    ),
    (
        "list-item",
        r"list-item|list item|list_item|list[\s\-_]*row|list[\s\-_]*cell",
        None,
    ),
    (
        "appbar",
        r"appbar|app-bar|navbar|nav-bar|header|top bar|page header",
        None,
    ),
    ("dialog", r"dialog|dialogue|popup|modal", Some(("modal", "-header"))),
    ("list", r"list", Some(("list", "-item"))),
    ("navigation", r"nav", None),
    ("header", r"h[1-6]|title|heading", Some(("heading", " bar"))),
    ("button", r"button|btn|cta|action", None),
    ("input", r"input|field|textfield|text-field|entry", None),
    ("textarea", r"textarea|text-area|multiline", None),
    ("select", r"select|dropdown|drop-down|picker", None),
    ("checkbox", r"checkbox|check-box", None),
    ("radio", r"radio|radiobutton|radio-button", None),
    ("switch", r"switch|toggle", None),
    ("slider", r"slider|range", None),
    ("searchbar", r"search|searchbar|search-bar", None),
    ("tab", r"tab|tabs|tabbar|tab-bar", None),
    ("breadcrumb", r"breadcrumb|bread-crumb", None),
    ("pagination", r"pagination|pager", None),
    ("bottomsheet", r"bottomsheet|bottom-sheet|drawer", None),
    ("sidebar", r"sidebar|side-bar", None),
    ("snackbar", r"snack|snackbar|toast|notification", None),
    ("alert", r"alert", None),
    ("tooltip", r"tooltip|tip|hint", None),
    ("badge", r"badge|indicator|count", None),
    ("progress", r"progress|loader|loading|spinner", None),
    ("skeleton", r"skeleton|placeholder", None),
    ("card", r"card|tile|block|panel", None),
    ("avatar", r"avatar|profile|user|photo", None),
    ("image", r"image|img|picture", None),
    ("video", r"video|player", None),
    ("icon", r"icon|pictogram|symbol", None),
    ("text", r"text|label|paragraph|caption|copy", None),
    ("link", r"link|anchor", None),
    ("container", r"container|wrapper|box|frame", None),
    ("grid", r"grid", None),
    ("divider", r"divider|separator|delimiter", None),
    ("spacer", r"spacer|space|gap", None),
    ("fab", r"fab|floating|float", None),
    ("chip", r"chip|tag", None),
    ("actionsheet", r"actionsheet|action-sheet", None),
    ("chart", r"chart|graph", None),
    ("table", r"table", None),
    ("calendar", r"calendar|date", None),
    ("timeline", r"timeline", None),
    ("gallery", r"gallery|carousel", None),
    ("price", r"price|cost", None),
    ("rating", r"rating|star", None),
    ("cart", r"cart|basket", None),
    ("map", r"map|location", None),
    ("code", r"code|syntax", None),
    ("terminal", r"terminal|console", None),
    ("stepper", r"stepper|wizard", None),
];

/// Roles tried before the rest of the table, in this order.
const PRIORITY: &[&str] = &[
    "icon-button",
    "upload",
    "form",
    "context-menu",
    "modal-header",
    "list-item",
    "appbar",
    "dialog",
    "snackbar",
    "bottomsheet",
    "actionsheet",
    "searchbar",
    "fab",
    "breadcrumb",
    "pagination",
    "skeleton",
    "textarea",
    "checkbox",
    "radio",
    "switch",
    "slider",
    "tab",
    "navigation",
    "tooltip",
    "badge",
    "progress",
    "avatar",
    "chip",
    "stepper",
    "chart",
    "table",
    "calendar",
    "timeline",
    "gallery",
    "rating",
];

struct Rule {
    role: &'static str,
    pattern: Regex,
    guard: Guard,
}

impl Rule {
    fn matches(&self, name: &str) -> bool {
        self.pattern.find_iter(name).any(|m| match self.guard {
            Some((keyword, suffix)) => {
                m.as_str() != keyword || !name[m.end()..].starts_with(suffix)
            }
            None => true,
        })
    }
}

/// Compiled rules in evaluation order: priority roles, then the table.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let compile = |&(role, pattern, guard): &(&'static str, &str, Guard)| {
        Regex::new(pattern).ok().map(|pattern| Rule {
            role,
            pattern,
            guard,
        })
    };
    let priority = PRIORITY
        .iter()
        .filter_map(|role| TABLE.iter().find(|(r, _, _)| r == role));
    let rest = TABLE.iter().filter(|(role, _, _)| !PRIORITY.contains(role));
    priority.chain(rest).filter_map(compile).collect()
});

/// Suggested UI role for a lowercased name.
fn guess_role(lower: &str) -> &'static str {
    RULES
        .iter()
        .find(|rule| rule.matches(lower))
        .map_or(UNKNOWN_ROLE, |rule| rule.role)
}

/// Confidence that `lower` names a `role`.
fn confidence(lower: &str, role: &str) -> f64 {
    if role == UNKNOWN_ROLE {
        return UNKNOWN_CONFIDENCE;
    }
    if lower == role {
        return EXACT_CONFIDENCE;
    }
    if lower.contains(role) {
        return CONTAINS_CONFIDENCE;
    }
    let hyphenated: String = lower
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { '-' } else { c })
        .collect();
    if hyphenated.contains(role) || lower.contains(&role.replace('-', "_")) {
        return FOLDED_CONFIDENCE;
    }
    PATTERN_CONFIDENCE
}

/// Classifies a component name into a UI role with a confidence score.
#[must_use]
pub fn classify(name: &str) -> (&'static str, f64) {
    let lower = name.to_lowercase();
    let role = guess_role(&lower);
    (role, confidence(&lower, role))
}

/// Category of a nested component, from its main component's name.
#[must_use]
pub fn guess_slot_category(name: &str) -> SlotCategory {
    let lower = name.to_lowercase();
    if lower.contains("icon") {
        SlotCategory::Icon
    } else if lower.contains("button") || lower.contains("btn") {
        SlotCategory::Button
    } else if lower.contains("input") || lower.contains("field") {
        SlotCategory::Input
    } else if lower.contains("image") || lower.contains("photo") {
        SlotCategory::Image
    } else {
        SlotCategory::Container
    }
}

/// Broad semantic role of a component, from its name.
#[must_use]
pub fn infer_semantic_role(name: &str) -> SemanticRole {
    let lower = name.to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));
    if has(&["nav", "tab", "menu"]) {
        SemanticRole::Navigation
    } else if has(&["button", "cta"]) {
        SemanticRole::Action
    } else if has(&["card", "item", "list"]) {
        SemanticRole::Display
    } else if has(&["input", "field", "form"]) {
        SemanticRole::Input
    } else {
        SemanticRole::Container
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_compiles() {
        assert_eq!(RULES.len(), TABLE.len());
    }

    #[test]
    fn test_every_priority_role_has_a_pattern() {
        for role in PRIORITY {
            assert!(TABLE.iter().any(|(r, _, _)| r == role), "{role}");
        }
    }

    #[test]
    fn test_exact_and_contains() {
        assert_eq!(classify("Button"), ("button", EXACT_CONFIDENCE));
        assert_eq!(classify("Primary Button"), ("button", CONTAINS_CONFIDENCE));
        assert_eq!(classify("CARD"), ("card", EXACT_CONFIDENCE));
    }

    #[test]
    fn test_compound_roles_win() {
        assert_eq!(classify("icon-button-primary").0, "icon-button");
        assert_eq!(classify("Button with Icon").0, "icon-button");
        assert_eq!(classify("List Item").0, "list-item");
        assert_eq!(classify("Modal Header").0, "modal-header");
        assert_eq!(classify("Search Field").0, "searchbar");
    }

    #[test]
    fn test_folded_separators() {
        assert_eq!(classify("List Item"), ("list-item", FOLDED_CONFIDENCE));
        assert_eq!(classify("icon_button"), ("icon-button", FOLDED_CONFIDENCE));
        assert_eq!(classify("context_menu").0, "text");
    }

    #[test]
    fn test_pattern_only() {
        assert_eq!(classify("Toast Message"), ("snackbar", PATTERN_CONFIDENCE));
        assert_eq!(classify("btn"), ("button", PATTERN_CONFIDENCE));
    }

    #[test]
    fn test_guards() {
        assert_eq!(classify("Modal").0, "dialog");
        assert_eq!(classify("Heading").0, "header");
        assert_eq!(classify("Checklist").0, "list");
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify("xyz123"), (UNKNOWN_ROLE, UNKNOWN_CONFIDENCE));
        assert_eq!(classify(""), (UNKNOWN_ROLE, UNKNOWN_CONFIDENCE));
    }

    #[test]
    fn test_confidence_always_in_unit_range() {
        for name in ["Button", "a", "Tab Bar", "Icon", "🙂", "form_field"] {
            let (_, c) = classify(name);
            assert!((0.0..=1.0).contains(&c), "{name}: {c}");
        }
    }

    #[test]
    fn test_slot_category() {
        assert_eq!(guess_slot_category("Icon/Chevron"), SlotCategory::Icon);
        assert_eq!(guess_slot_category("Btn Small"), SlotCategory::Button);
        assert_eq!(guess_slot_category("Text Field"), SlotCategory::Input);
        assert_eq!(guess_slot_category("Photo"), SlotCategory::Image);
        assert_eq!(guess_slot_category("Divider"), SlotCategory::Container);
    }

    #[test]
    fn test_semantic_role() {
        assert_eq!(infer_semantic_role("Tab Bar"), SemanticRole::Navigation);
        assert_eq!(infer_semantic_role("CTA"), SemanticRole::Action);
        assert_eq!(infer_semantic_role("List Item"), SemanticRole::Display);
        assert_eq!(infer_semantic_role("Form"), SemanticRole::Input);
        assert_eq!(infer_semantic_role("Frame"), SemanticRole::Container);
    }
}
