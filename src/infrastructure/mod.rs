//! Infrastructure layer
//!
//! Storage backends, external service adapters, and the services that
//! implement the marketplace's operations on top of them.

pub mod assets;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod chatbot;
pub mod job;
pub mod logging;
pub mod notification;
pub mod order;
pub mod storage;
pub mod user;
pub mod voice;
