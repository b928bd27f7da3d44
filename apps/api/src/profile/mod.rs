//! User profiles: the central document every other module reads from.

pub mod handlers;
pub mod models;
pub mod validation;
