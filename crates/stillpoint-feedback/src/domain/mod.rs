//! Domain layer for the feedback context.

pub mod aggregates;
pub mod commands;
pub mod policy;
