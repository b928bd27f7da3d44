//! Skill development: gap analysis, learning plans, and self-assessment.

pub mod analysis;
pub mod handlers;
