use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::domain::types::{
    CategoryName, ColorName, DiscountPercent, ImageUrl, Price, ProductId, ProductTitle, SizeName,
    StockQuantity, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`].
pub struct Product {
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
    pub rating_total: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
/// Insertable form of [`Product`].
pub struct NewProduct<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: i32,
    pub discounted_price: i32,
    pub discount_percent: i32,
    pub quantity: i32,
    pub brand: Option<&'a str>,
    pub color: &'a str,
    pub size: &'a str,
    pub image_url: Option<&'a str>,
    pub category: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
/// Data used when replacing the editable fields of a [`Product`] record.
pub struct UpdateProduct<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: i32,
    pub discounted_price: i32,
    pub discount_percent: i32,
    pub quantity: i32,
    pub brand: Option<&'a str>,
    pub color: &'a str,
    pub size: &'a str,
    pub image_url: Option<&'a str>,
    pub category: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::try_from(product.id)?,
            title: ProductTitle::new(product.title)?,
            description: product.description,
            price: Price::new(product.price)?,
            discounted_price: Price::new(product.discounted_price)?,
            discount_percent: DiscountPercent::new(product.discount_percent)?,
            quantity: StockQuantity::new(product.quantity)?,
            brand: product.brand,
            color: ColorName::new(product.color)?,
            size: SizeName::new(product.size)?,
            image_url: product.image_url.map(ImageUrl::new).transpose()?,
            category: CategoryName::new(product.category)?,
            num_ratings: product.num_ratings,
            rating_total: product.rating_total,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            title: product.title.as_str(),
            description: product.description.as_str(),
            price: product.price.get(),
            discounted_price: product.discounted_price.get(),
            discount_percent: product.discount_percent.get(),
            quantity: product.quantity.get(),
            brand: product.brand.as_deref(),
            color: product.color.as_str(),
            size: product.size.as_str(),
            image_url: product.image_url.as_ref().map(ImageUrl::as_str),
            category: product.category.as_str(),
        }
    }
}

impl<'a> UpdateProduct<'a> {
    /// Builds the changeset stamping `updated_at` with the given moment.
    pub fn new(product: &'a DomainUpdateProduct, updated_at: NaiveDateTime) -> Self {
        Self {
            title: product.title.as_str(),
            description: product.description.as_str(),
            price: product.price.get(),
            discounted_price: product.discounted_price.get(),
            discount_percent: product.discount_percent.get(),
            quantity: product.quantity.get(),
            brand: product.brand.as_deref(),
            color: product.color.as_str(),
            size: product.size.as_str(),
            image_url: product.image_url.as_ref().map(ImageUrl::as_str),
            category: product.category.as_str(),
            updated_at,
        }
    }
}
