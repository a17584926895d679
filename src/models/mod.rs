//! Database models shared across the shop repository.

pub mod config;
pub mod product;
pub mod review;
pub mod user;
