//! Job board domain

mod entity;

pub use entity::{JobId, JobPosting};
