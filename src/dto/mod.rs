//! Response bodies returned by the JSON API.

pub mod product;
pub mod review;
pub mod user;
