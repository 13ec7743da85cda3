//! Application layer for the content context.

pub mod command_handlers;
pub mod query_handlers;
