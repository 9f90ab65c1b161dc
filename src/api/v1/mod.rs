//! Versioned API handlers

pub mod cart;
pub mod chatbot;
pub mod jobs;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod voice;
