//! Application layer for the reservations context.

pub mod command_handlers;
pub mod query_handlers;
