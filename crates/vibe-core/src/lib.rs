//! # vibe-core - Core Domain Types
//!
//! Foundation crate for the vibe-mode inspection engine. Provides the
//! inspection snapshot types, utility-class classification, geometry
//! primitives, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Snapshot Types (`metadata`)
//! - [`InspectionMetadata`] - Immutable snapshot of one analyzed element
//! - [`AnalysisLevel`] - Requested inspection depth, with per-level time budgets
//! - [`ElementInfo`], [`StyleInfo`], [`LayoutSummary`], [`ReactInfo`] - Metadata groups
//! - [`AccessibilityFinding`], [`Severity`] - Audit findings
//!
//! ### Utility Classes (`tailwind`)
//! - [`classify_class()`] / [`classify_classes()`] - Tailwind-style class classification
//! - [`TailwindClass`], [`TailwindCategory`] - Classification results
//!
//! ### Geometry (`geometry`)
//! - [`Point`], [`Size`], [`Rect`] - Viewport-space value types
//! - [`Viewport`] - Visible page area with clamping helpers
//! - [`Placement`] - Overlay placement relative to a target
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Engine error enum with structural vs element-local classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use vibe_core::prelude::*;
//! ```

pub mod error;
pub mod geometry;
pub mod logging;
pub mod metadata;
pub mod tailwind;

/// Prelude for common imports used throughout all vibe-mode crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use geometry::{Placement, Point, Rect, Size, Viewport};
pub use metadata::{
    AccessibilityFinding, AnalysisLevel, AncestorSummary, ChildSummary, ComponentKind,
    CssFrameworkInfo, ElementInfo, HookSnapshot, InspectionInfo, InspectionMetadata,
    LayoutSummary, ParseLevelError, PerformanceMetrics, ReactInfo, Severity, StyleInfo,
    truncate_text, GROUP_ENTRY_MAX, TEXT_PREVIEW_MAX,
};
pub use tailwind::{classify_class, classify_classes, TailwindCategory, TailwindClass, BREAKPOINTS};
