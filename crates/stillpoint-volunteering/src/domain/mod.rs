//! Domain layer for the volunteering context.

pub mod aggregates;
pub mod commands;
pub mod policy;
