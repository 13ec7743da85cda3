//! Stillpoint Core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that all bounded
//! contexts depend on: roles and actors, the transition policy seam, the
//! document persistence seam, and the domain error taxonomy. It contains no
//! infrastructure code.

pub mod actor;
pub mod clock;
pub mod command;
pub mod error;
pub mod policy;
pub mod repository;
