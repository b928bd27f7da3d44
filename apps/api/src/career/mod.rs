//! Career catalog: browsing, search, comparison, and model-backed guidance.

pub mod handlers;
pub mod models;
