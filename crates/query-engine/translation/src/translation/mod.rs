//! Translate graph API responses into node graph frames.

pub mod fields;
pub mod frames;
pub mod template;
