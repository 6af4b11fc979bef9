#![forbid(unsafe_code)]

//! Squarified rectangular tiling.
//!
//! Children are tiled in their fixed weight order, one row at a time: a row
//! keeps absorbing the next child while its worst aspect ratio holds or
//! improves (Bruls et al.), then is laid along the shorter side of the
//! remaining rectangle, widths proportional to weight. Each internal node
//! reserves a per-depth header band at the top of its frame before outer
//! padding shrinks the content area; siblings are separated by a fixed gap.

use smallvec::SmallVec;
use tessella_core::{Frame, Insets, RectF};
use tessella_hierarchy::{Hierarchy, NodeId};

/// Header band heights per depth.
///
/// The band hosts the node's own label above its children. The root never
/// reserves one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderHeights {
    pub depth1: f64,
    pub depth2: f64,
    /// Depth 3 and beyond.
    pub deeper: f64,
}

impl HeaderHeights {
    /// Tall top-level headers, slimmer second level, none below.
    pub const DEFAULT: Self = Self {
        depth1: 24.0,
        depth2: 20.0,
        deeper: 0.0,
    };

    /// No header bands at any depth.
    pub const NONE: Self = Self {
        depth1: 0.0,
        depth2: 0.0,
        deeper: 0.0,
    };

    /// Band height reserved inside a node of the given depth.
    #[must_use]
    pub fn height_for(&self, depth: u32) -> f64 {
        match depth {
            0 => 0.0,
            1 => self.depth1,
            2 => self.depth2,
            _ => self.deeper,
        }
    }
}

impl Default for HeaderHeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options for the rectangular tiling strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingOptions {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Uniform shrink of every content area.
    pub outer_padding: f64,
    /// Gap between adjacent sibling rectangles.
    pub inner_gap: f64,
    /// Header bands per depth.
    pub headers: HeaderHeights,
    /// Target aspect ratio rows aim for; 1.0 favors squares.
    pub ratio: f64,
}

impl TilingOptions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            outer_padding: 1.0,
            inner_gap: 1.0,
            headers: HeaderHeights::DEFAULT,
            ratio: 1.0,
        }
    }

    #[must_use]
    pub fn outer_padding(mut self, padding: f64) -> Self {
        self.outer_padding = padding;
        self
    }

    #[must_use]
    pub fn inner_gap(mut self, gap: f64) -> Self {
        self.inner_gap = gap;
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: HeaderHeights) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }
}

impl Default for TilingOptions {
    fn default() -> Self {
        Self::new(960.0, 600.0)
    }
}

pub(crate) fn layout(hierarchy: &Hierarchy, opts: &TilingOptions, frames: &mut [Frame]) {
    let root_frame = RectF::from_size(opts.width.max(0.0), opts.height.max(0.0));
    let ratio = if opts.ratio > 0.0 { opts.ratio } else { 1.0 };
    place(hierarchy, hierarchy.root(), root_frame, ratio, opts, frames);
}

fn place(
    hierarchy: &Hierarchy,
    id: NodeId,
    rect: RectF,
    ratio: f64,
    opts: &TilingOptions,
    frames: &mut [Frame],
) {
    frames[id.index()] = Frame::Rect(rect);
    let children = hierarchy.children(id);
    if children.is_empty() {
        return;
    }

    let header = opts.headers.height_for(hierarchy.node(id).depth);
    let pad = opts.outer_padding.max(0.0);
    let content = rect.inset(Insets::new(header + pad, pad, pad, pad));

    // Half-gap scheme: tile over the content grown by gap/2, then inset
    // every child by gap/2, so siblings end up separated by exactly the
    // gap while outer edges stay flush with the content area.
    let half = opts.inner_gap.max(0.0) / 2.0;
    let tile_area = content.inset(Insets::all(-half));

    let weights: SmallVec<[f64; 16]> =
        children.iter().map(|&c| hierarchy.node(c).weight).collect();
    let mut tiles: SmallVec<[RectF; 16]> = SmallVec::from_elem(RectF::default(), children.len());
    squarify(&weights, tile_area, ratio, &mut tiles);

    for (i, &child) in children.iter().enumerate() {
        place(
            hierarchy,
            child,
            tiles[i].inset(Insets::all(half)),
            ratio,
            opts,
            frames,
        );
    }
}

/// Tile `weights` into `rect` in order, one row at a time.
///
/// Zero weights produce zero-area tiles; a zero total consumes no space.
/// The last tile of each row absorbs accumulated float error so rows fill
/// their strip exactly.
fn squarify(weights: &[f64], rect: RectF, ratio: f64, out: &mut [RectF]) {
    debug_assert_eq!(weights.len(), out.len());
    let n = weights.len();
    if n == 0 {
        return;
    }

    let mut x0 = rect.x0;
    let mut y0 = rect.y0;
    let x1 = rect.x1;
    let y1 = rect.y1;
    let mut value: f64 = weights.iter().sum();
    let mut i0 = 0;

    while i0 < n {
        let dx = (x1 - x0).max(0.0);
        let dy = (y1 - y0).max(0.0);
        if value <= 0.0 || dx <= 0.0 || dy <= 0.0 {
            // Out of weight or space: the rest collapse at the cursor.
            for slot in &mut out[i0..n] {
                *slot = RectF::new(x0, y0, x0, y0);
            }
            return;
        }

        // Open the row with the first child, swallowing leading zero
        // weights, then extend while the worst aspect holds or improves.
        let mut i1 = i0;
        let mut sum;
        loop {
            sum = weights[i1];
            i1 += 1;
            if sum != 0.0 || i1 >= n {
                break;
            }
        }
        let mut min = sum;
        let mut max = sum;
        let alpha = (dy / dx).max(dx / dy) / (value * ratio);
        let mut best = row_worst(min, max, sum, alpha);
        while i1 < n {
            let w = weights[i1];
            let worst = row_worst(min.min(w), max.max(w), sum + w, alpha);
            if worst > best {
                break;
            }
            sum += w;
            min = min.min(w);
            max = max.max(w);
            best = worst;
            i1 += 1;
        }

        let row_frac = (sum / value).clamp(0.0, 1.0);
        let last_row = i1 == n;
        if dx < dy {
            // Horizontal strip across the top.
            let strip = if last_row { dy } else { dy * row_frac };
            let strip_y1 = (y0 + strip).min(y1);
            let mut cx = x0;
            for i in i0..i1 {
                let adv = if sum > 0.0 { weights[i] / sum * dx } else { 0.0 };
                let cx1 = if i == i1 - 1 && sum > 0.0 {
                    x1
                } else {
                    (cx + adv).min(x1)
                };
                out[i] = RectF::new(cx, y0, cx1, strip_y1);
                cx = cx1;
            }
            y0 = strip_y1;
        } else {
            // Vertical strip down the left.
            let strip = if last_row { dx } else { dx * row_frac };
            let strip_x1 = (x0 + strip).min(x1);
            let mut cy = y0;
            for i in i0..i1 {
                let adv = if sum > 0.0 { weights[i] / sum * dy } else { 0.0 };
                let cy1 = if i == i1 - 1 && sum > 0.0 {
                    y1
                } else {
                    (cy + adv).min(y1)
                };
                out[i] = RectF::new(x0, cy, strip_x1, cy1);
                cy = cy1;
            }
            x0 = strip_x1;
        }
        value -= sum;
        i0 = i1;
    }
}

fn row_worst(min: f64, max: f64, sum: f64, alpha: f64) -> f64 {
    if sum <= 0.0 || min <= 0.0 {
        return f64::INFINITY;
    }
    let beta = sum * sum * alpha;
    (max / beta).max(beta / min)
}
