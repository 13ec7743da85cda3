//! Stillpoint: Event feedback bounded context.
//!
//! A minimal event catalog, and the video, comment and photo feedback that
//! attendees leave once an event is over.

pub mod application;
pub mod domain;
