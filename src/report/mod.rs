//! Report rendering.
//!
//! Text and JSON summaries live in `generator`; SVG charts in `charts`.

pub mod charts;
pub mod generator;

pub use charts::*;
pub use generator::*;
