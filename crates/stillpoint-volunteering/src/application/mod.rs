//! Application layer for the volunteering context.

pub mod command_handlers;
pub mod query_handlers;
