#![forbid(unsafe_code)]

//! Radial partition (sunburst) layout.
//!
//! Depth maps to concentric bands of equal thickness; a node's angular span
//! is its parent's, split among siblings in proportion to weight. The root
//! occupies the full turn at zero radius, which leaves the innermost band
//! as the center hole.

use std::f64::consts::TAU;

use tessella_core::{ArcBand, Frame};
use tessella_hierarchy::{Hierarchy, NodeId};

/// Options for the radial partition strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialOptions {
    /// Outer radius of the deepest band.
    pub max_radius: f64,
    /// Angular gap between adjacent sibling sectors, in radians.
    pub pad_angle: f64,
    /// Radial gap carved off the outer edge of every band.
    pub pad_radius: f64,
}

impl RadialOptions {
    #[must_use]
    pub fn new(max_radius: f64) -> Self {
        Self {
            max_radius,
            pad_angle: 0.005,
            pad_radius: 1.0,
        }
    }

    #[must_use]
    pub fn pad_angle(mut self, pad: f64) -> Self {
        self.pad_angle = pad;
        self
    }

    #[must_use]
    pub fn pad_radius(mut self, pad: f64) -> Self {
        self.pad_radius = pad;
        self
    }
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self::new(340.0)
    }
}

pub(crate) fn layout(hierarchy: &Hierarchy, opts: &RadialOptions, frames: &mut [Frame]) {
    // One band per depth level, the root's counted in even though its
    // sector is degenerate: the unused innermost band is the hole.
    let levels = f64::from(hierarchy.max_depth() + 1);
    let band = opts.max_radius.max(0.0) / levels;

    let root = hierarchy.root();
    frames[root.index()] = Frame::Arc(ArcBand::new(0.0, TAU, 0.0, 0.0));
    subdivide(hierarchy, root, 0.0, TAU, band, opts, frames);
}

fn subdivide(
    hierarchy: &Hierarchy,
    id: NodeId,
    a0: f64,
    a1: f64,
    band: f64,
    opts: &RadialOptions,
    frames: &mut [Frame],
) {
    let children = hierarchy.children(id);
    if children.is_empty() {
        return;
    }

    let k = children.len();
    let span = (a1 - a0).max(0.0);
    let gaps = (k - 1) as f64;
    let pad = if k > 1 {
        opts.pad_angle.max(0.0).min(span / gaps)
    } else {
        0.0
    };
    let available = (span - gaps * pad).max(0.0);
    let total: f64 = children.iter().map(|&c| hierarchy.node(c).weight).sum();

    let mut cursor = a0;
    for (i, &child) in children.iter().enumerate() {
        let node = hierarchy.node(child);
        let frac = if total > 0.0 { node.weight / total } else { 0.0 };
        // The last sector absorbs float error so the ring closes exactly.
        let end = if i + 1 == k && total > 0.0 {
            a1
        } else {
            (cursor + frac * available).min(a1)
        };

        let depth = f64::from(node.depth);
        let r0 = depth * band;
        let r1 = ((depth + 1.0) * band - opts.pad_radius.max(0.0)).max(r0);
        frames[child.index()] = Frame::Arc(ArcBand::new(cursor, end, r0, r1));

        subdivide(hierarchy, child, cursor, end, band, opts, frames);
        cursor = end + pad;
    }
}
