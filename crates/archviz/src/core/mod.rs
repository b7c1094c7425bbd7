//! Core building blocks for diagram rendering
//!
//! Graph declaration, DOT serialization, the rendering backend seam and the
//! scoped diagram context. Diagram content lives in [`crate::catalog`].

mod backend;
mod box_drawing;
mod diagram;
pub mod dot;
mod error;
mod graph;
pub mod logging;
mod text;
mod types;

pub use backend::*;
pub use box_drawing::*;
pub use diagram::*;
pub use dot::{write_dot, DotStyle};
pub use error::*;
pub use graph::*;
pub use logging::*;
pub use text::*;
pub use types::*;
