//! UI components.

pub mod seasonal;
