//! Persistence traits and their Diesel implementation.

use std::collections::BTreeSet;

use crate::db::{DbConnection, DbPool};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::product_filter::{PriceRange, ProductQueryError, ProductSort, StockStatus};
use crate::domain::review::{NewReview, Review};
use crate::domain::types::{ProductId, UserEmail, UserId};
use crate::domain::user::{NewUser, User};
use crate::pagination::PageRequest;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod product;
pub mod review;
pub mod user;

/// Diesel-backed repository sharing one connection pool across all aggregates.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        self.pool.get().map_err(|err| {
            log::error!("Failed to get connection from pool: {err}");
            err.into()
        })
    }
}

/// Criteria for a paged product listing.
///
/// Every criterion is optional. Independent criteria are combined with AND;
/// `colors` and `sizes` match when the product's value is any member of the
/// set. Textual criteria are stored lower-cased and matched with Unicode
/// case folding, both here and in SQL through [`crate::db::fold_case`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub colors: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
    pub price: PriceRange,
    pub min_discount: Option<i32>,
    pub stock: StockStatus,
    pub sort: ProductSort,
    pub page: PageRequest,
}

fn normalize_terms<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one category. Blank input leaves the criterion unset.
    pub fn category(mut self, category: impl AsRef<str>) -> Self {
        let category = category.as_ref().trim().to_lowercase();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    pub fn colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.colors = normalize_terms(colors);
        self
    }

    pub fn sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sizes = normalize_terms(sizes);
        self
    }

    /// Bounds the discounted price inclusively.
    pub fn price_range(
        mut self,
        min: Option<i32>,
        max: Option<i32>,
    ) -> Result<Self, ProductQueryError> {
        self.price = PriceRange::new(min, max)?;
        Ok(self)
    }

    pub fn min_discount(mut self, min_discount: i32) -> Result<Self, ProductQueryError> {
        if min_discount < 0 {
            return Err(ProductQueryError::InvalidRange(format!(
                "minimum discount {min_discount} is negative"
            )));
        }
        self.min_discount = Some(min_discount);
        Ok(self)
    }

    pub fn stock(mut self, stock: StockStatus) -> Self {
        self.stock = stock;
        self
    }

    pub fn sort(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page_number: i64, page_size: i64) -> Result<Self, ProductQueryError> {
        self.page = PageRequest::new(page_number, page_size)?;
        Ok(self)
    }

    /// Evaluates the filter criteria against a single product.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|c| product.category.to_lowercase() == *c);
        let color_ok =
            self.colors.is_empty() || self.colors.contains(&product.color.to_lowercase());
        let size_ok =
            self.sizes.is_empty() || self.sizes.contains(&product.size.to_lowercase());
        let discount_ok = self
            .min_discount
            .is_none_or(|min| product.discount_percent.get() >= min);

        category_ok
            && color_ok
            && size_ok
            && self.price.contains(product.discounted_price.get())
            && discount_ok
            && self.stock.accepts(product.quantity.get())
    }
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Returns the total number of matches and the requested page of them.
    fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    fn list_all_products(&self) -> RepositoryResult<Vec<Product>>;
    /// Case-insensitive substring match on title or description.
    fn search_products(&self, term: &str) -> RepositoryResult<Vec<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product>;
    fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
}

pub trait ReviewReader {
    fn list_product_reviews(&self, product_id: ProductId) -> RepositoryResult<Vec<Review>>;
}

pub trait ReviewWriter {
    fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::product_filter::{SortDirection, SortField};
    use crate::domain::types::{
        CategoryName, ColorName, DiscountPercent, Price, ProductTitle, SizeName, StockQuantity,
    };

    fn product(id: i32, category: &str, color: &str, size: &str, price: i32, discount: i32) -> Product {
        let now = Utc::now().naive_utc();
        let price = Price::new(price).unwrap();
        let discount_percent = DiscountPercent::new(discount).unwrap();
        Product {
            id: ProductId::new(id).unwrap(),
            title: ProductTitle::new(format!("Product {id}")).unwrap(),
            description: String::new(),
            price,
            discounted_price: price.discounted(discount_percent),
            discount_percent,
            quantity: StockQuantity::new(id % 2).unwrap(),
            brand: None,
            color: ColorName::new(color).unwrap(),
            size: SizeName::new(size).unwrap(),
            image_url: None,
            category: CategoryName::new(category).unwrap(),
            num_ratings: 0,
            rating_total: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = ProductListQuery::new();
        assert!(query.matches(&product(1, "Electronics", "Black", "L", 150, 10)));
        assert_eq!(query.page, PageRequest::default());
        assert_eq!(query.sort, ProductSort::default());
    }

    #[test]
    fn category_matches_case_insensitively() {
        let query = ProductListQuery::new().category("  electronics ");
        assert_eq!(query.category.as_deref(), Some("electronics"));
        assert!(query.matches(&product(1, "Electronics", "Black", "L", 150, 10)));
        assert!(!query.matches(&product(1, "Books", "Black", "L", 150, 10)));
    }

    #[test]
    fn non_ascii_criteria_fold_case() {
        let query = ProductListQuery::new()
            .category("ÉLECTRONIQUE")
            .colors(["ÉMERAUDE"]);
        assert_eq!(query.category.as_deref(), Some("électronique"));
        assert!(query.matches(&product(1, "Électronique", "Émeraude", "L", 150, 10)));
        assert!(!query.matches(&product(1, "Électronique", "Noir", "L", 150, 10)));
    }

    #[test]
    fn blank_category_is_ignored() {
        let query = ProductListQuery::new().category("   ");
        assert_eq!(query.category, None);
    }

    #[test]
    fn colors_are_or_within_and_across_criteria() {
        let query = ProductListQuery::new()
            .colors(["Black", "red", ""])
            .sizes(["L"]);
        assert_eq!(query.colors.len(), 2);
        assert!(query.matches(&product(1, "Electronics", "Red", "L", 150, 10)));
        assert!(query.matches(&product(1, "Electronics", "Black", "l", 150, 10)));
        assert!(!query.matches(&product(1, "Electronics", "Blue", "L", 150, 10)));
        assert!(!query.matches(&product(1, "Electronics", "Black", "M", 150, 10)));
    }

    #[test]
    fn price_bounds_apply_to_discounted_price() {
        let query = ProductListQuery::new()
            .price_range(Some(100), Some(140))
            .unwrap();
        // 150 with 10% off is 135.
        assert!(query.matches(&product(1, "Electronics", "Black", "L", 150, 10)));
        assert!(!query.matches(&product(1, "Electronics", "Black", "L", 150, 0)));
    }

    #[test]
    fn invalid_ranges_and_pages_are_rejected() {
        assert!(matches!(
            ProductListQuery::new().price_range(Some(500), Some(100)),
            Err(ProductQueryError::InvalidRange(_))
        ));
        assert!(matches!(
            ProductListQuery::new().min_discount(-5),
            Err(ProductQueryError::InvalidRange(_))
        ));
        assert!(matches!(
            ProductListQuery::new().paginate(-1, 10),
            Err(ProductQueryError::InvalidPagination(_))
        ));
        assert!(matches!(
            ProductListQuery::new().paginate(0, 0),
            Err(ProductQueryError::InvalidPagination(_))
        ));
    }

    #[test]
    fn discount_and_stock_criteria() {
        let query = ProductListQuery::new()
            .min_discount(10)
            .unwrap()
            .stock(StockStatus::InStock);
        // Odd ids carry one unit of stock in the fixture.
        assert!(query.matches(&product(1, "Electronics", "Black", "L", 150, 10)));
        assert!(!query.matches(&product(2, "Electronics", "Black", "L", 150, 10)));
        assert!(!query.matches(&product(3, "Electronics", "Black", "L", 150, 5)));
    }

    #[test]
    fn sort_compare_breaks_ties_by_id() {
        let sort = ProductSort::new(SortField::Price, SortDirection::Descending);
        let mut products = vec![
            product(3, "A", "Black", "L", 100, 0),
            product(1, "A", "Black", "L", 100, 0),
            product(2, "A", "Black", "L", 300, 0),
        ];
        products.sort_by(|a, b| sort.compare(a, b));
        let ids: Vec<i32> = products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
