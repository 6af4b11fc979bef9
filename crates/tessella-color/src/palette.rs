#![forbid(unsafe_code)]

//! Categorical palette and ancestry-based fill derivation.
//!
//! Top-level branches get categorical base colors; everything below them
//! inherits the branch color progressively washed out, so a node's fill
//! encodes which top-level family it belongs to and how deep it sits.

use rustc_hash::FxHashMap;
use tessella_hierarchy::{Hierarchy, NodeId};

use crate::space::{ColorError, Hsl, Rgb};

/// Ten categorical base fills (the classic "Category10" cycle).
pub const CATEGORICAL: [Rgb; 10] = [
    Rgb::new(31, 119, 180),  // #1f77b4 blue
    Rgb::new(255, 127, 14),  // #ff7f0e orange
    Rgb::new(44, 160, 44),   // #2ca02c green
    Rgb::new(214, 39, 40),   // #d62728 red
    Rgb::new(148, 103, 189), // #9467bd purple
    Rgb::new(140, 86, 75),   // #8c564b brown
    Rgb::new(227, 119, 194), // #e377c2 pink
    Rgb::new(127, 127, 127), // #7f7f7f gray
    Rgb::new(188, 189, 34),  // #bcbd22 olive
    Rgb::new(23, 190, 207),  // #17becf cyan
];

/// Assigns fills to names: explicit overrides win, otherwise names receive
/// palette colors in first-seen order, cycling when the colors run out.
/// Assignments are memoized so a name keeps its color for the palette's
/// lifetime.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Rgb>,
    overrides: FxHashMap<String, Rgb>,
    assigned: FxHashMap<String, Rgb>,
    next: usize,
}

impl Palette {
    /// Palette over the [`CATEGORICAL`] base colors.
    #[must_use]
    pub fn new() -> Self {
        Self::with_colors(CATEGORICAL.to_vec())
    }

    /// Palette over a custom color cycle. An empty cycle falls back to
    /// [`CATEGORICAL`].
    #[must_use]
    pub fn with_colors(colors: Vec<Rgb>) -> Self {
        let colors = if colors.is_empty() {
            CATEGORICAL.to_vec()
        } else {
            colors
        };
        Self {
            colors,
            overrides: FxHashMap::default(),
            assigned: FxHashMap::default(),
            next: 0,
        }
    }

    /// Pin a name to a fixed color, bypassing ordinal assignment.
    #[must_use]
    pub fn override_color(mut self, name: impl Into<String>, color: Rgb) -> Self {
        self.overrides.insert(name.into(), color);
        self
    }

    /// Pin a name to a fixed color given in hex notation.
    pub fn override_hex(self, name: impl Into<String>, hex: &str) -> Result<Self, ColorError> {
        let color = Rgb::from_hex(hex)?;
        Ok(self.override_color(name, color))
    }

    /// Color for a name: override if pinned, else the memoized assignment,
    /// else the next color in the cycle.
    pub fn color_for(&mut self, name: &str) -> Rgb {
        if let Some(&color) = self.overrides.get(name) {
            return color;
        }
        if let Some(&color) = self.assigned.get(name) {
            return color;
        }
        let color = self.colors[self.next % self.colors.len()];
        self.next += 1;
        self.assigned.insert(name.to_string(), color);
        color
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill per node, indexed by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    fills: Vec<Rgb>,
}

impl ColorMap {
    /// Fill assigned to `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to the hierarchy the fills were
    /// derived from.
    #[inline]
    #[must_use]
    pub fn fill(&self, id: NodeId) -> Rgb {
        self.fills[id.index()]
    }

    /// All fills in node-id order.
    #[must_use]
    pub fn fills(&self) -> &[Rgb] {
        &self.fills
    }
}

/// Derives one fill per node from its ancestor chain: a neutral root, a
/// palette color per depth-1 branch, and a per-level wash below that.
#[derive(Debug, Clone)]
pub struct ColorDeriver {
    palette: Palette,
    root_fill: Rgb,
    desaturate: f64,
    lighten: f64,
}

impl ColorDeriver {
    /// Neutral fill for the root frame.
    pub const ROOT_FILL: Rgb = Rgb::new(204, 204, 204);

    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            root_fill: Self::ROOT_FILL,
            desaturate: 0.8,
            lighten: 0.1,
        }
    }

    #[must_use]
    pub fn root_fill(mut self, fill: Rgb) -> Self {
        self.root_fill = fill;
        self
    }

    /// Per-level wash applied below depth 1: saturation factor and
    /// lightness shift.
    #[must_use]
    pub fn wash(mut self, desaturate: f64, lighten: f64) -> Self {
        self.desaturate = desaturate;
        self.lighten = lighten;
        self
    }

    /// Assign a fill to every node of the hierarchy.
    pub fn derive(&mut self, hierarchy: &Hierarchy) -> ColorMap {
        let mut fills = vec![self.root_fill; hierarchy.node_count()];
        for id in hierarchy.ids() {
            let node = hierarchy.node(id);
            fills[id.index()] = match (node.depth, node.parent) {
                (0, _) | (_, None) => self.root_fill,
                (1, _) => self.palette.color_for(&node.name),
                (_, Some(parent)) => {
                    // Parents precede children in id order, so the parent
                    // fill is final by the time it is read here.
                    Hsl::from_rgb(fills[parent.index()])
                        .desaturate(self.desaturate)
                        .lighten(self.lighten)
                        .to_rgb()
                }
            };
        }
        ColorMap { fills }
    }
}

impl Default for ColorDeriver {
    fn default() -> Self {
        Self::new(Palette::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessella_hierarchy::Node;

    fn find(h: &Hierarchy, name: &str) -> NodeId {
        h.ids().find(|&id| h.node(id).name == name).unwrap()
    }

    // --- Palette ---

    #[test]
    fn ordinal_assignment_in_first_seen_order() {
        let mut p = Palette::new();
        assert_eq!(p.color_for("alpha"), CATEGORICAL[0]);
        assert_eq!(p.color_for("beta"), CATEGORICAL[1]);
        assert_eq!(p.color_for("gamma"), CATEGORICAL[2]);
    }

    #[test]
    fn assignments_are_memoized() {
        let mut p = Palette::new();
        let first = p.color_for("alpha");
        let _ = p.color_for("beta");
        assert_eq!(p.color_for("alpha"), first);
    }

    #[test]
    fn palette_cycles_when_exhausted() {
        let mut p = Palette::with_colors(vec![Rgb::new(1, 0, 0), Rgb::new(0, 1, 0)]);
        assert_eq!(p.color_for("a"), Rgb::new(1, 0, 0));
        assert_eq!(p.color_for("b"), Rgb::new(0, 1, 0));
        assert_eq!(p.color_for("c"), Rgb::new(1, 0, 0));
    }

    #[test]
    fn override_beats_ordinal_and_consumes_no_slot() {
        let mut p = Palette::new().override_color("pinned", Rgb::new(8, 48, 107));
        assert_eq!(p.color_for("pinned"), Rgb::new(8, 48, 107));
        // The override did not advance the cycle.
        assert_eq!(p.color_for("next"), CATEGORICAL[0]);
    }

    #[test]
    fn override_hex_parses_or_errors() {
        let mut p = Palette::new().override_hex("Asia", "#08306b").unwrap();
        assert_eq!(p.color_for("Asia"), Rgb::new(8, 48, 107));

        assert!(Palette::new().override_hex("bad", "#nope").is_err());
    }

    #[test]
    fn empty_custom_cycle_falls_back_to_categorical() {
        let mut p = Palette::with_colors(Vec::new());
        assert_eq!(p.color_for("a"), CATEGORICAL[0]);
    }

    // --- ColorDeriver ---

    fn sales_tree() -> Node {
        Node::branch(
            "Sales",
            vec![
                Node::branch(
                    "Europe",
                    vec![Node::leaf("Germany", 15.0), Node::leaf("France", 25.0)],
                ),
                Node::branch("Asia", vec![Node::leaf("China", 60.0)]),
            ],
        )
    }

    #[test]
    fn root_gets_neutral_fill() {
        let h = Hierarchy::from_node(&sales_tree()).unwrap();
        let map = ColorDeriver::default().derive(&h);
        assert_eq!(map.fill(h.root()), Rgb::new(204, 204, 204));
    }

    #[test]
    fn depth_one_colors_follow_weight_order() {
        let h = Hierarchy::from_node(&sales_tree()).unwrap();
        let map = ColorDeriver::default().derive(&h);
        // Asia carries more weight, so it is seen first.
        assert_eq!(map.fill(find(&h, "Asia")), CATEGORICAL[0]);
        assert_eq!(map.fill(find(&h, "Europe")), CATEGORICAL[1]);
    }

    #[test]
    fn deeper_fills_are_washed_from_parent() {
        let h = Hierarchy::from_node(&sales_tree()).unwrap();
        let map = ColorDeriver::default().derive(&h);

        let europe = Hsl::from_rgb(map.fill(find(&h, "Europe")));
        let germany = Hsl::from_rgb(map.fill(find(&h, "Germany")));
        assert!((germany.s - europe.s * 0.8).abs() < 0.02);
        assert!((germany.l - (europe.l + 0.1)).abs() < 0.02);

        // Siblings of the same parent wash identically.
        assert_eq!(map.fill(find(&h, "Germany")), map.fill(find(&h, "France")));
    }

    #[test]
    fn renaming_a_leaf_changes_no_other_fill() {
        let h1 = Hierarchy::from_node(&sales_tree()).unwrap();
        let mut renamed = sales_tree();
        renamed.children[1].children[0].name = "PRC".into();
        let h2 = Hierarchy::from_node(&renamed).unwrap();

        let m1 = ColorDeriver::default().derive(&h1);
        let m2 = ColorDeriver::default().derive(&h2);

        assert_eq!(m1.fill(find(&h1, "Asia")), m2.fill(find(&h2, "Asia")));
        assert_eq!(m1.fill(find(&h1, "Europe")), m2.fill(find(&h2, "Europe")));
        // Fills below depth 1 come from ancestry, not the node's own name.
        assert_eq!(m1.fill(find(&h1, "China")), m2.fill(find(&h2, "PRC")));
    }

    #[test]
    fn wash_from_pure_red_matches_known_value() {
        let tree = Node::branch("r", vec![Node::branch("a", vec![Node::leaf("a1", 1.0)])]);
        let h = Hierarchy::from_node(&tree).unwrap();
        let mut deriver = ColorDeriver::new(Palette::with_colors(vec![Rgb::new(255, 0, 0)]));
        let map = deriver.derive(&h);

        assert_eq!(map.fill(find(&h, "a")), Rgb::new(255, 0, 0));
        assert_eq!(map.fill(find(&h, "a1")), Rgb::new(235, 71, 71));
    }

    #[test]
    fn wash_compounds_per_level() {
        let tree = Node::branch(
            "r",
            vec![Node::branch(
                "a",
                vec![Node::branch("b", vec![Node::leaf("c", 1.0)])],
            )],
        );
        let h = Hierarchy::from_node(&tree).unwrap();
        let map = ColorDeriver::default().derive(&h);

        let a = Hsl::from_rgb(map.fill(find(&h, "a")));
        let c = Hsl::from_rgb(map.fill(find(&h, "c")));
        assert!((c.s - a.s * 0.8 * 0.8).abs() < 0.03);
        assert!((c.l - (a.l + 0.2)).abs() < 0.03);
    }

    #[test]
    fn custom_root_fill_and_wash() {
        let tree = Node::branch("r", vec![Node::branch("a", vec![Node::leaf("a1", 1.0)])]);
        let h = Hierarchy::from_node(&tree).unwrap();
        let mut deriver = ColorDeriver::new(Palette::with_colors(vec![Rgb::new(255, 0, 0)]))
            .root_fill(Rgb::new(0, 0, 0))
            .wash(1.0, 0.0);
        let map = deriver.derive(&h);

        assert_eq!(map.fill(h.root()), Rgb::new(0, 0, 0));
        // An identity wash keeps the parent color.
        assert_eq!(map.fill(find(&h, "a1")), Rgb::new(255, 0, 0));
    }

    #[test]
    fn memoization_survives_across_derives() {
        let first = Node::branch("r", vec![Node::leaf("Alpha", 1.0)]);
        let second = Node::branch(
            "r",
            vec![Node::leaf("Beta", 5.0), Node::leaf("Alpha", 1.0)],
        );
        let mut deriver = ColorDeriver::default();

        let h1 = Hierarchy::from_node(&first).unwrap();
        let alpha_fill = deriver.derive(&h1).fill(find(&h1, "Alpha"));
        assert_eq!(alpha_fill, CATEGORICAL[0]);

        // Alpha keeps its color even though Beta now sorts first.
        let h2 = Hierarchy::from_node(&second).unwrap();
        let map = deriver.derive(&h2);
        assert_eq!(map.fill(find(&h2, "Alpha")), CATEGORICAL[0]);
        assert_eq!(map.fill(find(&h2, "Beta")), CATEGORICAL[1]);
    }
}
