//! Application layer for the catalog context.

pub mod command_handlers;
pub mod enrichment;
pub mod pagination;
pub mod query_handlers;
