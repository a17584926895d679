use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryName, ColorName, DiscountPercent, ImageUrl, Price, ProductId, ProductTitle, SizeName,
    StockQuantity,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: ProductTitle,
    pub description: String,
    pub price: Price,
    /// Price after `discount_percent` is applied.
    pub discounted_price: Price,
    pub discount_percent: DiscountPercent,
    pub quantity: StockQuantity,
    pub brand: Option<String>,
    pub color: ColorName,
    pub size: SizeName,
    pub image_url: Option<ImageUrl>,
    pub category: CategoryName,
    pub num_ratings: i32,
    pub rating_total: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Mean star rating, or `None` when nobody has rated the product yet.
    pub fn average_rating(&self) -> Option<f64> {
        if self.num_ratings > 0 {
            Some(f64::from(self.rating_total) / f64::from(self.num_ratings))
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub title: ProductTitle,
    pub description: String,
    pub price: Price,
    pub discounted_price: Price,
    pub discount_percent: DiscountPercent,
    pub quantity: StockQuantity,
    pub brand: Option<String>,
    pub color: ColorName,
    pub size: SizeName,
    pub image_url: Option<ImageUrl>,
    pub category: CategoryName,
}

impl NewProduct {
    /// Builds a new product, deriving the discounted price from `price` and `discount_percent`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: ProductTitle,
        description: String,
        price: Price,
        discount_percent: DiscountPercent,
        quantity: StockQuantity,
        brand: Option<String>,
        color: ColorName,
        size: SizeName,
        image_url: Option<ImageUrl>,
        category: CategoryName,
    ) -> Self {
        Self {
            title,
            description: description.trim().to_string(),
            price,
            discounted_price: price.discounted(discount_percent),
            discount_percent,
            quantity,
            brand: brand
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            color,
            size,
            image_url,
            category,
        }
    }
}

/// Full replacement of a product's editable fields.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProduct {
    pub title: ProductTitle,
    pub description: String,
    pub price: Price,
    pub discounted_price: Price,
    pub discount_percent: DiscountPercent,
    pub quantity: StockQuantity,
    pub brand: Option<String>,
    pub color: ColorName,
    pub size: SizeName,
    pub image_url: Option<ImageUrl>,
    pub category: CategoryName,
}

impl From<NewProduct> for UpdateProduct {
    fn from(product: NewProduct) -> Self {
        Self {
            title: product.title,
            description: product.description,
            price: product.price,
            discounted_price: product.discounted_price,
            discount_percent: product.discount_percent,
            quantity: product.quantity,
            brand: product.brand,
            color: product.color,
            size: product.size,
            image_url: product.image_url,
            category: product.category,
        }
    }
}
