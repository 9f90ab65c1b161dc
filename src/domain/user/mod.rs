//! User domain
//!
//! Domain types and traits for marketplace identity: user entities, role
//! checks, validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{Role, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    UserValidationError, validate_email, validate_name, validate_password, validate_user_id,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
