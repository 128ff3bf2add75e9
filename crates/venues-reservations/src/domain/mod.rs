//! Domain layer for the reservations context.

pub mod commands;
