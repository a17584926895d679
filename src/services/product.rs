//! Product listing, lookup and administration.

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::types::ProductId;
use crate::domain::user::User;
use crate::dto::product::{ProductResponse, ProductSummary};
use crate::forms::product::{ProductForm, ProductsQueryParams};
use crate::pagination::ResultPage;
use crate::repository::errors::RepositoryError;
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin, log_internal};

fn product_not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Product not found with id {id}"))
}

fn product_id(id: i32) -> ServiceResult<ProductId> {
    ProductId::new(id).map_err(|_| product_not_found(id))
}

/// Maps a missing row to the product-specific message.
fn not_found_as(id: i32) -> impl Fn(RepositoryError) -> ServiceError {
    move |err| match err {
        RepositoryError::NotFound => product_not_found(id),
        other => ServiceError::from(other),
    }
}

/// Runs the filtered, sorted and paged product listing.
///
/// Invalid criteria are rejected before the repository is consulted.
pub fn list_products<R>(
    repo: &R,
    params: ProductsQueryParams,
) -> ServiceResult<ResultPage<ProductSummary>>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::try_from(params)?;

    let (total, products) = repo
        .list_products(&query)
        .map_err(|err| log_internal("Failed to list products", err.into()))?;

    Ok(ResultPage::new(products, query.page, total).map(ProductSummary::from))
}

/// Case-insensitive search over titles and descriptions.
pub fn search_products<R>(repo: &R, term: &str) -> ServiceResult<Vec<ProductSummary>>
where
    R: ProductReader + ?Sized,
{
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let products = repo
        .search_products(term)
        .map_err(|err| log_internal("Failed to search products", err.into()))?;

    Ok(products.into_iter().map(ProductSummary::from).collect())
}

pub fn find_product_by_id<R>(repo: &R, id: i32) -> ServiceResult<ProductResponse>
where
    R: ProductReader + ?Sized,
{
    let product_id = product_id(id)?;

    repo.get_product_by_id(product_id)
        .map_err(|err| log_internal("Failed to load product", err.into()))?
        .map(ProductResponse::from)
        .ok_or_else(|| product_not_found(id))
}

pub fn create_product<R>(repo: &R, user: &User, form: ProductForm) -> ServiceResult<ProductResponse>
where
    R: ProductWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_product = NewProduct::try_from(form)?;

    let product = repo
        .create_product(&new_product)
        .map_err(|err| log_internal("Failed to create product", err.into()))?;

    log::info!("Product {} created by {}", product.id, user.email);
    Ok(product.into())
}

pub fn list_all_products<R>(repo: &R, user: &User) -> ServiceResult<Vec<ProductResponse>>
where
    R: ProductReader + ?Sized,
{
    ensure_admin(user)?;

    let products = repo
        .list_all_products()
        .map_err(|err| log_internal("Failed to list all products", err.into()))?;

    Ok(products.into_iter().map(ProductResponse::from).collect())
}

/// Replaces the editable fields of an existing product.
pub fn update_product<R>(
    repo: &R,
    user: &User,
    id: i32,
    form: ProductForm,
) -> ServiceResult<ProductResponse>
where
    R: ProductWriter + ?Sized,
{
    ensure_admin(user)?;

    let product_id = product_id(id)?;
    let updates = UpdateProduct::try_from(form)?;

    let product = repo
        .update_product(product_id, &updates)
        .map_err(not_found_as(id))
        .map_err(|err| log_internal("Failed to update product", err))?;

    Ok(product.into())
}

/// Removes a product together with its reviews.
pub fn delete_product<R>(repo: &R, user: &User, id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_admin(user)?;

    let product_id = product_id(id)?;

    repo.delete_product(product_id)
        .map_err(not_found_as(id))
        .map_err(|err| log_internal("Failed to delete product", err))?;

    log::info!("Product {id} deleted by {}", user.email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::product_filter::{ProductQueryError, SortDirection, SortField};
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{product, user};

    fn form() -> ProductForm {
        ProductForm {
            title: "Test Product".into(),
            description: "desc".into(),
            price: 150,
            discount_percent: 10,
            quantity: 5,
            brand: None,
            color: "Black".into(),
            size: "L".into(),
            image_url: None,
            category: "Electronics".into(),
        }
    }

    #[test]
    fn list_products_builds_page_from_repository_result() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| {
                query.category.as_deref() == Some("electronics")
                    && query.colors.contains("black")
                    && query.price.min() == Some(100)
                    && query.price.max() == Some(500)
                    && query.min_discount == Some(10)
                    && query.sort.field == SortField::Price
                    && query.sort.direction == SortDirection::Ascending
            })
            .times(1)
            .returning(|_| Ok((1, vec![product(1, "Test Product")])));

        let params = ProductsQueryParams {
            category: Some("Electronics".into()),
            color: vec!["Black".into()],
            min_price: Some(100),
            max_price: Some(500),
            min_discount: Some(10),
            sort: Some("price_low".into()),
            ..Default::default()
        };

        let page = list_products(&repo, params).unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.content[0].title, "Test Product");
        assert_eq!(page.content[0].discounted_price, 135);
    }

    #[test]
    fn list_products_rejects_invalid_criteria_without_querying() {
        let mut repo = MockRepository::new();
        repo.expect_list_products().times(0);

        let params = ProductsQueryParams {
            min_price: Some(500),
            max_price: Some(100),
            ..Default::default()
        };
        assert!(matches!(
            list_products(&repo, params),
            Err(ServiceError::Query(ProductQueryError::InvalidRange(_)))
        ));

        let params = ProductsQueryParams {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            list_products(&repo, params),
            Err(ServiceError::Query(ProductQueryError::InvalidPagination(_)))
        ));
    }

    #[test]
    fn list_products_with_no_matches_is_empty_page() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .returning(|_| Ok((0, Vec::new())));

        let page = list_products(&repo, ProductsQueryParams::default()).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn list_products_surfaces_repository_failure() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .returning(|_| Err(RepositoryError::ConnectionError("down".into())));

        assert!(matches!(
            list_products(&repo, ProductsQueryParams::default()),
            Err(ServiceError::Repository(_))
        ));
    }

    #[test]
    fn blank_search_skips_repository() {
        let mut repo = MockRepository::new();
        repo.expect_search_products().times(0);

        assert!(search_products(&repo, "   ").unwrap().is_empty());
    }

    #[test]
    fn search_trims_term() {
        let mut repo = MockRepository::new();
        repo.expect_search_products()
            .withf(|term| term == "Test")
            .times(1)
            .returning(|_| Ok(vec![product(1, "Test Product")]));

        let found = search_products(&repo, "  Test ").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn missing_product_reports_id() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id()
            .with(eq(ProductId::new(1).unwrap()))
            .returning(|_| Ok(None));

        match find_product_by_id(&repo, 1) {
            Err(ServiceError::NotFound(message)) => {
                assert_eq!(message, "Product not found with id 1")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn admin_operations_require_admin() {
        let mut repo = MockRepository::new();
        repo.expect_create_product().times(0);
        repo.expect_list_all_products().times(0);
        repo.expect_delete_product().times(0);
        let customer = user(2, UserRole::Customer);

        assert!(matches!(
            create_product(&repo, &customer, form()),
            Err(ServiceError::Forbidden)
        ));
        assert!(matches!(
            list_all_products(&repo, &customer),
            Err(ServiceError::Forbidden)
        ));
        assert!(matches!(
            delete_product(&repo, &customer, 1),
            Err(ServiceError::Forbidden)
        ));
    }

    #[test]
    fn create_product_derives_discounted_price() {
        let mut repo = MockRepository::new();
        repo.expect_create_product()
            .withf(|new| new.discounted_price.get() == 135 && new.title.as_str() == "Test Product")
            .times(1)
            .returning(|_| Ok(product(1, "Test Product")));

        let created = create_product(&repo, &user(1, UserRole::Admin), form()).unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn invalid_form_is_rejected_before_insert() {
        let mut repo = MockRepository::new();
        repo.expect_create_product().times(0);
        let mut bad = form();
        bad.price = -1;

        assert!(matches!(
            create_product(&repo, &user(1, UserRole::Admin), bad),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn update_of_unknown_product_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_update_product()
            .returning(|_, _| Err(RepositoryError::NotFound));

        match update_product(&repo, &user(1, UserRole::Admin), 42, form()) {
            Err(ServiceError::NotFound(message)) => {
                assert_eq!(message, "Product not found with id 42")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn delete_product_passes_id() {
        let mut repo = MockRepository::new();
        repo.expect_delete_product()
            .with(eq(ProductId::new(3).unwrap()))
            .times(1)
            .returning(|_| Ok(()));

        assert!(delete_product(&repo, &user(1, UserRole::Admin), 3).is_ok());
    }
}
