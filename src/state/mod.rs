//! State management for the comparison engine.

pub mod selection;

pub use selection::{LoadRequest, SelectionController, SelectionState, Side};
