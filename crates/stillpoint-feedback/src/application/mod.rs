//! Application layer for the feedback context.

pub mod command_handlers;
pub mod query_handlers;
