//! # Utility-Class Classification
//!
//! Classifies CSS utility class names (Tailwind-style) by the concern they
//! encode. Classification is by naming convention only — no stylesheet is
//! consulted — so it can never fail: unrecognized names fall into
//! [`TailwindCategory::Other`].
//!
//! A class carries a breakpoint prefix (`sm:`, `md:`, `lg:`, `xl:`, `2xl:`)
//! when it only applies from that viewport width up; such classes are marked
//! `responsive`. State prefixes (`hover:`, `focus:`, ...) are stripped before
//! classification but do not mark a class responsive.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Responsive breakpoint prefixes, in ascending width order.
pub const BREAKPOINTS: &[&str] = &["sm", "md", "lg", "xl", "2xl"];

/// The style concern a utility class encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailwindCategory {
    Spacing,
    Colors,
    Layout,
    Typography,
    Sizing,
    Effects,
    Other,
}

impl TailwindCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TailwindCategory::Spacing => "spacing",
            TailwindCategory::Colors => "colors",
            TailwindCategory::Layout => "layout",
            TailwindCategory::Typography => "typography",
            TailwindCategory::Sizing => "sizing",
            TailwindCategory::Effects => "effects",
            TailwindCategory::Other => "other",
        }
    }
}

/// One classified utility class from an element's class list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailwindClass {
    /// The class name as written on the element, prefix included.
    pub class_name: String,
    pub category: TailwindCategory,
    /// True when the class carries a breakpoint prefix.
    pub responsive: bool,
}

/// Matches `<family>-<color>-<scale>` color utilities, e.g. `bg-blue-500`.
static COLOR_SCALE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(bg|text|border|ring|divide|outline|decoration|accent|caret|fill|stroke)-[a-z]+-(?:50|[1-9]50|[1-9]00)$")
        .expect("color scale regex is valid")
});

/// Matches bare named-color utilities, e.g. `bg-white`, `text-transparent`.
static NAMED_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(bg|text|border|ring|divide|outline)-(white|black|transparent|current|inherit)$")
        .expect("named color regex is valid")
});

const SPACING_PREFIXES: &[&str] = &[
    "p-", "px-", "py-", "pt-", "pr-", "pb-", "pl-", "m-", "mx-", "my-", "mt-", "mr-", "mb-", "ml-",
    "gap-", "space-x-", "space-y-", "inset-",
];

const LAYOUT_EXACT: &[&str] = &[
    "flex",
    "grid",
    "block",
    "inline",
    "inline-block",
    "inline-flex",
    "inline-grid",
    "hidden",
    "table",
    "contents",
    "flow-root",
    "static",
    "fixed",
    "absolute",
    "relative",
    "sticky",
    "container",
    "isolate",
];

const LAYOUT_PREFIXES: &[&str] = &[
    "flex-", "grid-", "justify-", "items-", "content-", "self-", "place-", "order-", "col-",
    "row-", "float-", "clear-", "object-", "overflow-", "z-", "basis-", "grow", "shrink",
];

const TYPOGRAPHY_EXACT: &[&str] = &[
    "italic",
    "not-italic",
    "underline",
    "no-underline",
    "line-through",
    "uppercase",
    "lowercase",
    "capitalize",
    "normal-case",
    "truncate",
    "antialiased",
];

const TYPOGRAPHY_PREFIXES: &[&str] = &[
    "font-",
    "leading-",
    "tracking-",
    "whitespace-",
    "break-",
    "indent-",
    "list-",
    "align-",
];

/// `text-` sizes classify as typography; every other `text-` value is a color.
const TEXT_SIZES: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
];

const TEXT_ALIGNMENTS: &[&str] = &["left", "center", "right", "justify", "start", "end"];

const SIZING_PREFIXES: &[&str] = &[
    "w-", "h-", "min-w-", "max-w-", "min-h-", "max-h-", "size-",
];

const EFFECT_EXACT: &[&str] = &["shadow", "rounded", "border", "ring", "transition", "blur"];

const EFFECT_PREFIXES: &[&str] = &[
    "shadow-",
    "rounded-",
    "opacity-",
    "blur-",
    "brightness-",
    "transition-",
    "duration-",
    "ease-",
    "delay-",
    "animate-",
    "cursor-",
];

/// Non-responsive state prefixes that may precede the utility name.
const STATE_PREFIXES: &[&str] = &[
    "hover", "focus", "focus-within", "focus-visible", "active", "visited", "disabled", "dark",
    "group-hover", "first", "last", "odd", "even",
];

/// Classify a single class name.
///
/// The returned [`TailwindClass`] always echoes the original name, prefixes
/// included, so callers can render the class list verbatim.
pub fn classify_class(name: &str) -> TailwindClass {
    let (bare, responsive) = strip_prefixes(name);
    TailwindClass {
        class_name: name.to_string(),
        category: categorize(bare),
        responsive,
    }
}

/// Classify every class on an element, preserving class-list order.
pub fn classify_classes<S: AsRef<str>>(classes: &[S]) -> Vec<TailwindClass> {
    classes
        .iter()
        .map(|c| classify_class(c.as_ref()))
        .collect()
}

/// Strip breakpoint and state prefixes, reporting whether any breakpoint
/// prefix was present. `md:hover:flex` → (`flex`, responsive).
fn strip_prefixes(name: &str) -> (&str, bool) {
    let mut rest = name;
    let mut responsive = false;
    while let Some((prefix, tail)) = rest.split_once(':') {
        if BREAKPOINTS.contains(&prefix) {
            responsive = true;
        } else if !STATE_PREFIXES.contains(&prefix) {
            // Unknown prefix: leave the whole remainder for categorization.
            break;
        }
        rest = tail;
    }
    (rest, responsive)
}

fn categorize(bare: &str) -> TailwindCategory {
    if SPACING_PREFIXES.iter().any(|p| bare.starts_with(p)) {
        return TailwindCategory::Spacing;
    }

    if COLOR_SCALE_REGEX.is_match(bare) || NAMED_COLOR_REGEX.is_match(bare) {
        return TailwindCategory::Colors;
    }

    // `text-*` is overloaded: sizes and alignment are typography, the rest
    // (text-blue-500, text-white already matched above) are colors.
    if let Some(value) = bare.strip_prefix("text-") {
        if TEXT_SIZES.contains(&value) || TEXT_ALIGNMENTS.contains(&value) {
            return TailwindCategory::Typography;
        }
        return TailwindCategory::Colors;
    }

    if let Some(value) = bare.strip_prefix("bg-") {
        // bg-cover / bg-center / bg-fixed position the background image;
        // everything else names a color.
        const BG_NON_COLOR: &[&str] = &[
            "cover", "contain", "center", "top", "bottom", "left", "right", "fixed", "local",
            "scroll", "repeat", "no-repeat", "none",
        ];
        if BG_NON_COLOR.contains(&value) {
            return TailwindCategory::Other;
        }
        return TailwindCategory::Colors;
    }

    if LAYOUT_EXACT.contains(&bare) || LAYOUT_PREFIXES.iter().any(|p| bare.starts_with(p)) {
        return TailwindCategory::Layout;
    }

    if TYPOGRAPHY_EXACT.contains(&bare) || TYPOGRAPHY_PREFIXES.iter().any(|p| bare.starts_with(p))
    {
        return TailwindCategory::Typography;
    }

    if SIZING_PREFIXES.iter().any(|p| bare.starts_with(p)) {
        return TailwindCategory::Sizing;
    }

    if EFFECT_EXACT.contains(&bare) || EFFECT_PREFIXES.iter().any(|p| bare.starts_with(p)) {
        return TailwindCategory::Effects;
    }

    if bare.starts_with("border-") || bare.starts_with("ring-") {
        // Remaining border-/ring- values are widths and styles.
        return TailwindCategory::Effects;
    }

    TailwindCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_of(name: &str) -> TailwindCategory {
        classify_class(name).category
    }

    #[test]
    fn test_spacing_classes() {
        assert_eq!(category_of("p-4"), TailwindCategory::Spacing);
        assert_eq!(category_of("mx-auto"), TailwindCategory::Spacing);
        assert_eq!(category_of("gap-2"), TailwindCategory::Spacing);
        assert_eq!(category_of("space-y-6"), TailwindCategory::Spacing);
    }

    #[test]
    fn test_color_classes() {
        assert_eq!(category_of("bg-blue-500"), TailwindCategory::Colors);
        assert_eq!(category_of("text-gray-900"), TailwindCategory::Colors);
        assert_eq!(category_of("border-red-50"), TailwindCategory::Colors);
        assert_eq!(category_of("bg-white"), TailwindCategory::Colors);
        assert_eq!(category_of("text-transparent"), TailwindCategory::Colors);
    }

    #[test]
    fn test_layout_classes() {
        assert_eq!(category_of("flex"), TailwindCategory::Layout);
        assert_eq!(category_of("grid-cols-3"), TailwindCategory::Layout);
        assert_eq!(category_of("justify-between"), TailwindCategory::Layout);
        assert_eq!(category_of("absolute"), TailwindCategory::Layout);
        assert_eq!(category_of("z-50"), TailwindCategory::Layout);
        assert_eq!(category_of("hidden"), TailwindCategory::Layout);
    }

    #[test]
    fn test_typography_classes() {
        assert_eq!(category_of("font-bold"), TailwindCategory::Typography);
        assert_eq!(category_of("text-xl"), TailwindCategory::Typography);
        assert_eq!(category_of("text-center"), TailwindCategory::Typography);
        assert_eq!(category_of("leading-tight"), TailwindCategory::Typography);
        assert_eq!(category_of("truncate"), TailwindCategory::Typography);
    }

    #[test]
    fn test_sizing_and_effects() {
        assert_eq!(category_of("w-64"), TailwindCategory::Sizing);
        assert_eq!(category_of("max-w-prose"), TailwindCategory::Sizing);
        assert_eq!(category_of("shadow-lg"), TailwindCategory::Effects);
        assert_eq!(category_of("rounded-xl"), TailwindCategory::Effects);
        assert_eq!(category_of("opacity-75"), TailwindCategory::Effects);
        assert_eq!(category_of("border-2"), TailwindCategory::Effects);
    }

    #[test]
    fn test_unrecognized_class_is_other_never_error() {
        assert_eq!(category_of("btn-primary"), TailwindCategory::Other);
        assert_eq!(category_of("legacy_widget"), TailwindCategory::Other);
        assert_eq!(category_of(""), TailwindCategory::Other);
        assert_eq!(category_of("bg-cover"), TailwindCategory::Other);
    }

    #[test]
    fn test_breakpoint_prefix_marks_responsive() {
        let c = classify_class("sm:flex");
        assert_eq!(c.class_name, "sm:flex");
        assert_eq!(c.category, TailwindCategory::Layout);
        assert!(c.responsive);

        let c = classify_class("2xl:p-8");
        assert_eq!(c.category, TailwindCategory::Spacing);
        assert!(c.responsive);
    }

    #[test]
    fn test_state_prefix_is_not_responsive() {
        let c = classify_class("hover:bg-blue-500");
        assert_eq!(c.category, TailwindCategory::Colors);
        assert!(!c.responsive);
    }

    #[test]
    fn test_stacked_prefixes() {
        let c = classify_class("md:hover:flex");
        assert_eq!(c.category, TailwindCategory::Layout);
        assert!(c.responsive);
    }

    #[test]
    fn test_classify_classes_preserves_order() {
        let classes = ["p-4", "bg-blue-500", "sm:flex"];
        let out = classify_classes(&classes);
        assert_eq!(out.len(), 3);
        assert_eq!(
            out[0],
            TailwindClass {
                class_name: "p-4".into(),
                category: TailwindCategory::Spacing,
                responsive: false,
            }
        );
        assert_eq!(
            out[1],
            TailwindClass {
                class_name: "bg-blue-500".into(),
                category: TailwindCategory::Colors,
                responsive: false,
            }
        );
        assert_eq!(
            out[2],
            TailwindClass {
                class_name: "sm:flex".into(),
                category: TailwindCategory::Layout,
                responsive: true,
            }
        );
    }
}
