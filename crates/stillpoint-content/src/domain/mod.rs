//! Domain layer for the content context.

pub mod aggregates;
pub mod body;
pub mod commands;
pub mod policy;
