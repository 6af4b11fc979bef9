#![forbid(unsafe_code)]

//! Core: shared geometric primitives for the partition layout pipeline.

pub mod geometry;

pub use geometry::{ArcBand, Frame, Insets, Point, RectF};
