//! Rendering and persistence of evaluation results

pub mod formatter;
pub mod store;
