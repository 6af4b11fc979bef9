#![forbid(unsafe_code)]

//! One-call pipeline from input records to render-ready nodes.

use tessella_color::{ColorDeriver, Palette, Rgb};
use tessella_core::Frame;
use tessella_hierarchy::{Hierarchy, Node, NodeId, collapse_self_named};
use tessella_label::{LabelOptions, LabelPlan};
use tessella_layout::{LayoutStrategy, RadialOptions, TilingOptions};

use crate::Error;

/// One render-ready node: geometry, fill and label for a drawing surface.
///
/// Nodes come out in id order, parents before children and siblings by
/// weight descending, so a surface can paint the slice front to back.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledNode {
    pub id: NodeId,
    pub name: String,
    pub depth: u32,
    pub weight: f64,
    pub frame: Frame,
    pub color: Rgb,
    pub label: LabelPlan,
}

/// Chart configuration and pipeline runner.
///
/// A chart owns everything but the data: the layout strategy, the palette
/// and wash, the label rules. [`render`](Self::render) never mutates the
/// chart, so one configured chart can serve many datasets and repeated
/// renders of the same records are identical.
#[derive(Debug, Clone)]
pub struct Chart {
    strategy: LayoutStrategy,
    colors: ColorDeriver,
    labels: LabelOptions,
    collapse_self_named: bool,
    round: bool,
}

impl Chart {
    /// A squarified treemap on the given canvas.
    #[must_use]
    pub fn tiling(opts: TilingOptions) -> Self {
        Self::with_strategy(LayoutStrategy::Tiling(opts), LabelOptions::default())
    }

    /// A sunburst over the given radii. Label planning picks up the outer
    /// radius so external labels hang just outside the rim.
    #[must_use]
    pub fn radial(opts: RadialOptions) -> Self {
        let labels = LabelOptions::default().boundary_radius(opts.max_radius);
        Self::with_strategy(LayoutStrategy::Radial(opts), labels)
    }

    fn with_strategy(strategy: LayoutStrategy, labels: LabelOptions) -> Self {
        Self {
            strategy,
            colors: ColorDeriver::default(),
            labels,
            collapse_self_named: false,
            round: false,
        }
    }

    /// Replace the whole color stage.
    #[must_use]
    pub fn colors(mut self, deriver: ColorDeriver) -> Self {
        self.colors = deriver;
        self
    }

    /// Replace the base palette, keeping the default wash.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.colors = ColorDeriver::new(palette);
        self
    }

    /// Replace the label rules, including any radius sync done by
    /// [`radial`](Self::radial).
    #[must_use]
    pub fn labels(mut self, opts: LabelOptions) -> Self {
        self.labels = opts;
        self
    }

    /// Absorb children that re-declare their parent's name before building.
    #[must_use]
    pub fn collapse_self_named(mut self, enabled: bool) -> Self {
        self.collapse_self_named = enabled;
        self
    }

    /// Snap output frames to whole coordinates. Proportional math stays
    /// exact; only the final frames move.
    #[must_use]
    pub fn round(mut self, enabled: bool) -> Self {
        self.round = enabled;
        self
    }

    /// Run the pipeline: build, lay out, color and label the records.
    ///
    /// Fails only on malformed input (negative or non-finite values); every
    /// degenerate-but-valid shape renders, possibly with empty frames.
    pub fn render(&self, records: &Node) -> Result<Vec<StyledNode>, Error> {
        let hierarchy = if self.collapse_self_named {
            let mut records = records.clone();
            collapse_self_named(&mut records);
            Hierarchy::from_node(&records)?
        } else {
            Hierarchy::from_node(records)?
        };

        let layout = tessella_layout::compute(&hierarchy, &self.strategy);
        // Ordinal assignment state is per render, so datasets never bleed
        // palette slots into each other.
        let fills = self.colors.clone().derive(&hierarchy);
        let labels = tessella_label::plan(&hierarchy, &layout, &self.labels);

        let nodes = hierarchy
            .ids()
            .map(|id| {
                let node = hierarchy.node(id);
                let frame = *layout.frame(id);
                StyledNode {
                    id,
                    name: node.name.clone(),
                    depth: node.depth,
                    weight: node.weight,
                    frame: if self.round { frame.round() } else { frame },
                    color: fills.fill(id),
                    label: labels.plan(id).clone(),
                }
            })
            .collect();
        Ok(nodes)
    }
}

impl Default for Chart {
    /// A treemap on the default canvas.
    fn default() -> Self {
        Self::tiling(TilingOptions::default())
    }
}
