//! Utility modules for feed generation.

pub mod date;
pub mod text;
pub mod xml;
