pub mod health;
pub mod ratings;
pub mod upload;
pub mod visibility;
