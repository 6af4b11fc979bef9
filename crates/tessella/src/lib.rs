#![forbid(unsafe_code)]

//! Tessella public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates, offers a lightweight
//! prelude, and bundles the whole pipeline behind [`Chart`]: hand it a
//! [`Node`] tree and get back one [`StyledNode`] per node, framed, filled
//! and labeled, ready for any drawing surface.

use std::fmt;

mod chart;

pub use chart::{Chart, StyledNode};

// --- Input re-exports -------------------------------------------------------

pub use tessella_hierarchy::{
    Hierarchy, HierarchyBuilder, HierarchyError, HierarchyNode, Node, NodeId, collapse_self_named,
};

// --- Geometry re-exports ----------------------------------------------------

pub use tessella_core::{ArcBand, Frame, Insets, Point, RectF};

// --- Layout re-exports ------------------------------------------------------

pub use tessella_layout::{
    HeaderHeights, LayoutStrategy, LayoutTree, RadialOptions, TilingOptions, compute,
};

// --- Color re-exports -------------------------------------------------------

pub use tessella_color::{CATEGORICAL, ColorDeriver, ColorError, ColorMap, Hsl, Palette, Rgb};

// --- Label re-exports -------------------------------------------------------

pub use tessella_label::{Anchor, LabelMap, LabelOptions, LabelPlan, format_value, plan};

// --- Errors -----------------------------------------------------------------

/// Top-level error type for tessella pipelines.
#[derive(Debug)]
pub enum Error {
    /// Input records failed hierarchy validation.
    Hierarchy(HierarchyError),
    /// A color override could not be parsed.
    Color(ColorError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hierarchy(err) => write!(f, "{err}"),
            Self::Color(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HierarchyError> for Error {
    fn from(err: HierarchyError) -> Self {
        Self::Hierarchy(err)
    }
}

impl From<ColorError> for Error {
    fn from(err: ColorError) -> Self {
        Self::Color(err)
    }
}

/// Standard result type for tessella APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude ----------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Anchor, Chart, Error, Frame, LabelOptions, LabelPlan, Node, RadialOptions, Result, Rgb,
        StyledNode, TilingOptions,
    };

    pub use crate::{color, core, hierarchy, label, layout};
}

pub use tessella_color as color;
pub use tessella_core as core;
pub use tessella_hierarchy as hierarchy;
pub use tessella_label as label;
pub use tessella_layout as layout;
