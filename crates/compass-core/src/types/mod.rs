//! Core type definitions

mod circle;
mod color;
mod decoration;
mod line;
mod point;

pub use circle::*;
pub use color::*;
pub use decoration::*;
pub use line::*;
pub use point::*;
