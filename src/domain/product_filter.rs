//! Vocabulary of the product listing filter: price bounds, stock status and
//! sort order. The criteria themselves are assembled by
//! [`crate::repository::ProductListQuery`].

use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::Product;
use crate::pagination::PaginationError;

/// Rejected listing criteria.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductQueryError {
    /// Price or discount bounds are negative or inverted.
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// Unrecognised sort field, sort direction or stock status.
    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),
    #[error(transparent)]
    InvalidPagination(#[from] PaginationError),
}

/// Inclusive bounds on the discounted price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    min: Option<i32>,
    max: Option<i32>,
}

impl PriceRange {
    pub fn new(min: Option<i32>, max: Option<i32>) -> Result<Self, ProductQueryError> {
        if let Some(min) = min.filter(|&m| m < 0) {
            return Err(ProductQueryError::InvalidRange(format!(
                "minimum price {min} is negative"
            )));
        }
        if let Some(max) = max.filter(|&m| m < 0) {
            return Err(ProductQueryError::InvalidRange(format!(
                "maximum price {max} is negative"
            )));
        }
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(ProductQueryError::InvalidRange(format!(
                "minimum price {min} exceeds maximum price {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Option<i32> {
        self.min
    }

    pub fn max(&self) -> Option<i32> {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, price: i32) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

/// Classification of stock quantity used for filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    Any,
    InStock,
    OutOfStock,
}

impl StockStatus {
    pub fn accepts(self, quantity: i32) -> bool {
        match self {
            StockStatus::Any => true,
            StockStatus::InStock => quantity > 0,
            StockStatus::OutOfStock => quantity == 0,
        }
    }
}

impl FromStr for StockStatus {
    type Err = ProductQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" | "all" => Ok(StockStatus::Any),
            "in_stock" | "instock" | "in-stock" => Ok(StockStatus::InStock),
            "out_of_stock" | "outofstock" | "out-of-stock" => Ok(StockStatus::OutOfStock),
            other => Err(ProductQueryError::InvalidCriteria(format!(
                "unknown stock status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Persistence order (identifier ascending).
    #[default]
    Default,
    /// Discounted price.
    Price,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = ProductQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(ProductQueryError::InvalidCriteria(format!(
                "unknown sort direction '{other}'"
            ))),
        }
    }
}

/// Requested ordering; ties are always broken by identifier ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ProductSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parses the `sort` parameter. `price_low`/`price_high` carry their own
    /// direction and override `direction`.
    pub fn parse(sort: &str, direction: SortDirection) -> Result<Self, ProductQueryError> {
        match sort.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(Self::new(SortField::Default, direction)),
            "price" => Ok(Self::new(SortField::Price, direction)),
            "title" => Ok(Self::new(SortField::Title, direction)),
            "price_low" => Ok(Self::new(SortField::Price, SortDirection::Ascending)),
            "price_high" => Ok(Self::new(SortField::Price, SortDirection::Descending)),
            other => Err(ProductQueryError::InvalidCriteria(format!(
                "unknown sort field '{other}'"
            ))),
        }
    }

    /// Orders two products the way the persistence query does.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self.field {
            SortField::Default => Ordering::Equal,
            SortField::Price => a.discounted_price.cmp(&b.discounted_price),
            SortField::Title => a.title.as_str().cmp(b.title.as_str()),
        };
        let primary = match self.direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl Display for ProductSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = match self.field {
            SortField::Default => "default",
            SortField::Price => "price",
            SortField::Title => "title",
        };
        let direction = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        write!(f, "{field} {direction}")
    }
}
