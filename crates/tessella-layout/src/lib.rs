#![forbid(unsafe_code)]

//! Layout: turns a weighted hierarchy into one frame per node.
//!
//! Two strategies share the same contract. [`tiling`] subdivides a fixed
//! rectangular canvas into squarified tiles with per-depth header bands;
//! [`radial`] assigns concentric sectors whose angular spans track weight.
//! Both visit every node, so zero-weight and degenerate nodes still get a
//! (possibly empty) frame.

pub mod radial;
pub mod tiling;

pub use radial::RadialOptions;
pub use tiling::{HeaderHeights, TilingOptions};

use tessella_core::{Frame, RectF};
use tessella_hierarchy::{Hierarchy, NodeId};

/// Which geometry family a layout pass assigns.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutStrategy {
    /// Squarified rectangles on a fixed canvas.
    Tiling(TilingOptions),
    /// Concentric weighted sectors around a center hole.
    Radial(RadialOptions),
}

/// Frames produced by a layout pass, indexed by [`NodeId`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTree {
    frames: Vec<Frame>,
}

impl LayoutTree {
    /// Frame assigned to `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to the hierarchy this layout was
    /// computed from.
    #[inline]
    #[must_use]
    pub fn frame(&self, id: NodeId) -> &Frame {
        &self.frames[id.index()]
    }

    /// All frames in node-id order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames; equals the hierarchy's node count.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.frames.len()
    }
}

/// Assign a frame to every node of the hierarchy.
#[must_use]
pub fn compute(hierarchy: &Hierarchy, strategy: &LayoutStrategy) -> LayoutTree {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("layout", nodes = hierarchy.node_count()).entered();

    let mut frames = vec![Frame::Rect(RectF::default()); hierarchy.node_count()];
    match strategy {
        LayoutStrategy::Tiling(opts) => tiling::layout(hierarchy, opts, &mut frames),
        LayoutStrategy::Radial(opts) => radial::layout(hierarchy, opts, &mut frames),
    }
    LayoutTree { frames }
}
