#![forbid(unsafe_code)]

//! Label planning for laid-out hierarchies.
//!
//! Planning decides, per node, whether its name is drawn inside its frame,
//! shortened to fit, moved outside on a leader line, or skipped. The output
//! is a pure description; drawing belongs to the caller.

use std::f64::consts::PI;

use tessella_core::{ArcBand, Frame, Point, RectF};
use tessella_hierarchy::{Hierarchy, HierarchyNode, NodeId};
use tessella_layout::LayoutTree;

use crate::measure::{display_width, format_value, truncate_with_ellipsis};

/// Horizontal alignment of label text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// Text extends rightward from the position.
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text extends leftward from the position.
    End,
}

/// How one node's label should be drawn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelPlan {
    /// No label.
    None,
    /// Full text inside the node's frame. Multi-line labels embed `\n`.
    Inline {
        text: String,
        font_size: f64,
        at: Point,
        anchor: Anchor,
    },
    /// Shortened text inside the node's frame; `text` already ends in `…`.
    Truncated {
        text: String,
        font_size: f64,
        at: Point,
        anchor: Anchor,
    },
    /// Text outside the chart, tied to the frame by a leader line.
    External {
        text: String,
        font_size: f64,
        at: Point,
        anchor: Anchor,
        leader_from: Point,
        leader_to: Point,
    },
}

impl LabelPlan {
    /// Check if this plan draws anything.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, LabelPlan::None)
    }
}

/// Options for label planning.
///
/// Radial thresholds are in radians and canvas units; rectangular gates in
/// canvas units. `boundary_radius` must match the radius the layout was
/// computed with, since external labels hang just outside it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelOptions {
    /// Width of one text cell as a fraction of the font size.
    pub glyph_aspect: f64,
    /// Minimum angular span for an in-sector label.
    pub span_threshold: f64,
    /// Font cap for in-sector labels.
    pub max_inline_font: f64,
    /// Fitted sizes below this fall back to an external label.
    pub min_inline_font: f64,
    /// Font for external labels.
    pub external_font: f64,
    /// Outer radius of the radial chart.
    pub boundary_radius: f64,
    /// Header font at depth 1.
    pub header_font_depth1: f64,
    /// Header font at depth 2.
    pub header_font_depth2: f64,
    /// Font for leaf tile labels.
    pub leaf_font: f64,
    /// Leaf tiles narrower than this get no label.
    pub min_leaf_width: f64,
    /// Leaf tiles shorter than this get no label.
    pub min_leaf_height: f64,
    /// Prepended to formatted leaf values.
    pub value_prefix: String,
    /// Appended to formatted leaf values.
    pub value_suffix: String,
}

impl LabelOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            glyph_aspect: 0.6,
            span_threshold: 0.1,
            max_inline_font: 14.0,
            min_inline_font: 6.0,
            external_font: 10.0,
            boundary_radius: 340.0,
            header_font_depth1: 16.0,
            header_font_depth2: 14.0,
            leaf_font: 12.0,
            min_leaf_width: 50.0,
            min_leaf_height: 26.0,
            value_prefix: "$".to_string(),
            value_suffix: "k".to_string(),
        }
    }

    #[must_use]
    pub fn span_threshold(mut self, threshold: f64) -> Self {
        self.span_threshold = threshold;
        self
    }

    #[must_use]
    pub fn boundary_radius(mut self, radius: f64) -> Self {
        self.boundary_radius = radius;
        self
    }

    #[must_use]
    pub fn glyph_aspect(mut self, aspect: f64) -> Self {
        self.glyph_aspect = aspect;
        self
    }

    /// Units wrapped around formatted leaf values, e.g. `("$", "k")`.
    #[must_use]
    pub fn value_units(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.value_prefix = prefix.into();
        self.value_suffix = suffix.into();
        self
    }
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Label plans produced by a planning pass, indexed by [`NodeId`].
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    plans: Vec<LabelPlan>,
}

impl LabelMap {
    /// Plan for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to the hierarchy the plans were
    /// computed from.
    #[inline]
    #[must_use]
    pub fn plan(&self, id: NodeId) -> &LabelPlan {
        &self.plans[id.index()]
    }

    /// All plans in node-id order.
    #[must_use]
    pub fn plans(&self) -> &[LabelPlan] {
        &self.plans
    }
}

/// Plan a label for every node of a laid-out hierarchy.
#[must_use]
pub fn plan(hierarchy: &Hierarchy, layout: &LayoutTree, opts: &LabelOptions) -> LabelMap {
    let plans = hierarchy
        .ids()
        .map(|id| {
            let node = hierarchy.node(id);
            match layout.frame(id) {
                Frame::Rect(rect) => plan_rect(node, rect, opts),
                Frame::Arc(arc) => plan_radial(node, arc, opts),
            }
        })
        .collect();
    LabelMap { plans }
}

fn plan_radial(node: &HierarchyNode, arc: &ArcBand, opts: &LabelOptions) -> LabelPlan {
    if node.depth == 0 || arc.is_empty() || node.name.is_empty() {
        return LabelPlan::None;
    }

    if arc.span() >= opts.span_threshold {
        // Fit the name along the band's middle arc; the fitted size shrinks
        // with the name and is capped for wide sectors.
        let units = display_width(&node.name) as f64;
        let fitted = (arc.arc_length() / units).min(opts.max_inline_font);
        if fitted >= opts.min_inline_font {
            return LabelPlan::Inline {
                text: node.name.clone(),
                font_size: fitted,
                at: arc.centroid(),
                anchor: Anchor::Middle,
            };
        }
    }

    // Too slim to read in place: hang the name outside the rim, tied back
    // by a leader along the sector's middle angle.
    let mid = arc.mid_angle();
    let anchor = if mid > PI { Anchor::End } else { Anchor::Start };
    LabelPlan::External {
        text: node.name.clone(),
        font_size: opts.external_font,
        at: Point::from_polar(mid, opts.boundary_radius + 5.0),
        anchor,
        leader_from: Point::from_polar(mid, (arc.r1 - 2.0).max(arc.r0)),
        leader_to: Point::from_polar(mid, opts.boundary_radius + 2.0),
    }
}

fn plan_rect(node: &HierarchyNode, rect: &RectF, opts: &LabelOptions) -> LabelPlan {
    if node.depth == 0 || rect.is_empty() || node.name.is_empty() {
        return LabelPlan::None;
    }

    if node.is_leaf() {
        if rect.width() > opts.min_leaf_width && rect.height() > opts.min_leaf_height {
            let value = format!(
                "{}{}{}",
                opts.value_prefix,
                format_value(node.weight),
                opts.value_suffix
            );
            return LabelPlan::Inline {
                text: format!("{}\n{}", node.name, value),
                font_size: opts.leaf_font,
                at: Point::new(rect.x0 + 4.0, rect.y0 + opts.leaf_font + 2.0),
                anchor: Anchor::Start,
            };
        }
        return LabelPlan::None;
    }

    let font = match node.depth {
        1 => opts.header_font_depth1,
        2 => opts.header_font_depth2,
        // Deeper groups reserve no header band.
        _ => return LabelPlan::None,
    };

    let at = Point::new(rect.x0 + 4.0, rect.y0 + font);
    let cell_px = font * opts.glyph_aspect;
    let budget = ((rect.width() - 8.0) / cell_px).floor();
    if budget < 1.0 {
        return LabelPlan::None;
    }
    let budget = budget as usize;

    if display_width(&node.name) <= budget {
        LabelPlan::Inline {
            text: node.name.clone(),
            font_size: font,
            at,
            anchor: Anchor::Start,
        }
    } else {
        LabelPlan::Truncated {
            text: truncate_with_ellipsis(&node.name, budget),
            font_size: font,
            at,
            anchor: Anchor::Start,
        }
    }
}
