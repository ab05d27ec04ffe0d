//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_rating_repository;
mod postgres_rating_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_rating_repository::InMemoryRatingRepository;
pub use postgres_rating_repository::PostgresRatingRepository;
