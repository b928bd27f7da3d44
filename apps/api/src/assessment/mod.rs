//! Assessment lifecycle: start, answer, complete, score, review.

pub mod handlers;
pub mod models;
pub mod questions;
pub mod scoring;
