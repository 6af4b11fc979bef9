#![forbid(unsafe_code)]

//! Label planning: decide what text a partition chart shows and where.
//!
//! [`plan`] walks a laid-out hierarchy and produces a [`LabelPlan`] per node:
//! inline text when the frame has room, truncated text when it almost does,
//! an external leader-line label for slim radial sectors, or nothing.
//! Measurement is cell-based (Unicode display width), so CJK and emoji
//! labels budget correctly.

pub mod measure;
pub mod plan;

pub use measure::{display_width, format_value, truncate_with_ellipsis};
pub use plan::{Anchor, LabelMap, LabelOptions, LabelPlan, plan};
