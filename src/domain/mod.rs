//! Domain aggregates exposed by the shop service layer.

pub mod product;
pub mod product_filter;
pub mod review;
pub mod types;
pub mod user;
