use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::Product;

/// Listing projection of a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i32,
    pub title: String,
    pub price: i32,
    pub discounted_price: i32,
    pub discount_percent: i32,
    pub quantity: i32,
    pub category: String,
    pub color: String,
    pub size: String,
    pub num_ratings: i32,
    pub average_rating: Option<f64>,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            average_rating: product.average_rating(),
            title: product.title.into_inner(),
            price: product.price.get(),
            discounted_price: product.discounted_price.get(),
            discount_percent: product.discount_percent.get(),
            quantity: product.quantity.get(),
            category: product.category.into_inner(),
            color: product.color.into_inner(),
            size: product.size.into_inner(),
            num_ratings: product.num_ratings,
        }
    }
}

/// Full product representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub discounted_price: i32,
    pub discount_percent: i32,
    pub quantity: i32,
    pub brand: Option<String>,
    pub color: String,
    pub size: String,
    pub image_url: Option<String>,
    pub category: String,
    pub num_ratings: i32,
    pub average_rating: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            average_rating: product.average_rating(),
            title: product.title.into_inner(),
            description: product.description,
            price: product.price.get(),
            discounted_price: product.discounted_price.get(),
            discount_percent: product.discount_percent.get(),
            quantity: product.quantity.get(),
            brand: product.brand,
            color: product.color.into_inner(),
            size: product.size.into_inner(),
            image_url: product.image_url.map(|url| url.into_inner()),
            category: product.category.into_inner(),
            num_ratings: product.num_ratings,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
