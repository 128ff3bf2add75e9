//! Domain layer for the catalog context.

pub mod commands;
pub mod queries;
pub mod rating;
pub mod search_area;
