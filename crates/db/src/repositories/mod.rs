//! One repository struct per table.

pub mod cleanup_repo;
pub mod user_repo;

pub use cleanup_repo::{BookingRepo, CarRepo, ReviewRepo, SessionRepo};
pub use user_repo::UserRepo;
