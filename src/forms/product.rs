use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::product_filter::{ProductQueryError, ProductSort, SortDirection, StockStatus};
use crate::domain::types::{
    CategoryName, ColorName, DiscountPercent, ImageUrl, Price, ProductTitle, SizeName,
    StockQuantity,
};
use crate::forms::FormError;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::repository::ProductListQuery;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Payload for creating a product or replacing an existing one.
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub discount_percent: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub brand: Option<String>,
    #[validate(length(min = 1))]
    pub color: String,
    #[validate(length(min = 1))]
    pub size: String,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(min = 1))]
    pub category: String,
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let image_url = form.image_url.map(ImageUrl::new).transpose()?;

        Ok(NewProduct::new(
            ProductTitle::new(form.title)?,
            form.description,
            Price::new(form.price)?,
            DiscountPercent::new(form.discount_percent)?,
            StockQuantity::new(form.quantity)?,
            form.brand,
            ColorName::new(form.color)?,
            SizeName::new(form.size)?,
            image_url,
            CategoryName::new(form.category)?,
        ))
    }
}

impl TryFrom<ProductForm> for UpdateProduct {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        NewProduct::try_from(form).map(UpdateProduct::from)
    }
}

/// Query string of the product listing endpoint.
///
/// `color` and `size` may be repeated and/or hold comma-separated values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQueryParams {
    pub category: Option<String>,
    #[serde(default)]
    pub color: Vec<String>,
    #[serde(default)]
    pub size: Vec<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub min_discount: Option<i32>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub stock: Option<String>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

fn split_list(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().flat_map(|value| value.split(','))
}

impl TryFrom<ProductsQueryParams> for ProductListQuery {
    type Error = ProductQueryError;

    fn try_from(params: ProductsQueryParams) -> Result<Self, Self::Error> {
        let direction = params
            .order
            .as_deref()
            .unwrap_or_default()
            .parse::<SortDirection>()?;
        let sort = ProductSort::parse(params.sort.as_deref().unwrap_or_default(), direction)?;
        let stock = params
            .stock
            .as_deref()
            .unwrap_or_default()
            .parse::<StockStatus>()?;

        let mut query = ProductListQuery::new()
            .colors(split_list(&params.color))
            .sizes(split_list(&params.size))
            .stock(stock)
            .sort(sort)
            .price_range(params.min_price, params.max_price)?
            .paginate(
                params.page_number.unwrap_or(0),
                params.page_size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
            )?;

        if let Some(category) = &params.category {
            query = query.category(category);
        }
        if let Some(min_discount) = params.min_discount {
            query = query.min_discount(min_discount)?;
        }

        Ok(query)
    }
}
