//! Color model used for clear colors and vertex tints.

pub mod color;

pub use color::Color;
