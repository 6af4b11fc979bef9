#![forbid(unsafe_code)]

//! Color: ancestry-derived fills for partition charts.
//!
//! A chart's fills come from one top-down pass: the root stays neutral,
//! each depth-1 branch draws a categorical color from a [`Palette`]
//! (overridable per name), and deeper nodes wash their parent's color out
//! in HSL space. See [`ColorDeriver`].

pub mod palette;
pub mod space;

pub use palette::{CATEGORICAL, ColorDeriver, ColorMap, Palette};
pub use space::{ColorError, Hsl, Rgb};
