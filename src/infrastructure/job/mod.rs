//! Job board infrastructure

pub mod service;

pub use service::{JobService, JobServiceTrait, PostJobRequest};
