//! Stillpoint: Content bounded context.
//!
//! Photo collages, videos, publications, team members, testimonials and the
//! other site content types, curated through a draft → pending review →
//! published workflow with admin-only archival and deletion.

pub mod application;
pub mod domain;
