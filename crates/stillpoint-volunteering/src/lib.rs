//! Stillpoint: Volunteering bounded context.
//!
//! Volunteer opportunities with custom questions, and the moderation of the
//! applications submitted against them.

pub mod application;
pub mod domain;
