//! Authentication infrastructure

pub mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
