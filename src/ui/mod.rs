//! Terminal rendering of a running navigator.

pub mod field;
pub mod render;

pub use render::NeuralPanels;
