//! Review creation and listing.

use crate::domain::types::ProductId;
use crate::domain::user::User;
use crate::dto::review::ReviewResponse;
use crate::forms::review::ReviewForm;
use crate::repository::{ProductReader, ReviewReader, ReviewWriter};
use crate::services::{ServiceError, ServiceResult, log_internal};

/// Stores a review written by `user`.
///
/// The product is looked up first; when it does not exist nothing is written.
pub fn create_review<R>(repo: &R, user: &User, form: ReviewForm) -> ServiceResult<ReviewResponse>
where
    R: ProductReader + ReviewWriter + ?Sized,
{
    let raw_product_id = form.product_id;
    let new_review = form.into_new_review(user.id)?;

    let product = repo
        .get_product_by_id(new_review.product_id)
        .map_err(|err| log_internal("Failed to load product", err.into()))?;
    if product.is_none() {
        return Err(ServiceError::NotFound(format!(
            "Product not found with id {raw_product_id}"
        )));
    }

    let review = repo
        .create_review(&new_review)
        .map_err(|err| log_internal("Failed to create review", err.into()))?;

    Ok(review.into())
}

/// Reviews of a product, newest first.
pub fn list_product_reviews<R>(repo: &R, product_id: i32) -> ServiceResult<Vec<ReviewResponse>>
where
    R: ReviewReader + ?Sized,
{
    let Ok(product_id) = ProductId::new(product_id) else {
        return Ok(Vec::new());
    };

    let reviews = repo
        .list_product_reviews(product_id)
        .map_err(|err| log_internal("Failed to list reviews", err.into()))?;

    Ok(reviews.into_iter().map(ReviewResponse::from).collect())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::review::Review;
    use crate::domain::types::{Rating, ReviewId, ReviewText, UserId};
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{product, user};

    fn form() -> ReviewForm {
        ReviewForm {
            product_id: 1,
            review: "Great product!".into(),
            rating: Some(5),
        }
    }

    fn review(id: i32) -> Review {
        Review {
            id: ReviewId::new(id).unwrap(),
            product_id: ProductId::new(1).unwrap(),
            user_id: UserId::new(1).unwrap(),
            review: ReviewText::new("Great product!").unwrap(),
            rating: Some(Rating::new(5).unwrap()),
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn creates_review_for_existing_product() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id()
            .with(eq(ProductId::new(1).unwrap()))
            .times(1)
            .returning(|_| Ok(Some(product(1, "Test Product"))));
        repo.expect_create_review()
            .withf(|new| {
                new.user_id.get() == 1
                    && new.review.as_str() == "Great product!"
                    && new.rating.map(Rating::get) == Some(5)
            })
            .times(1)
            .returning(|_| Ok(review(1)));

        let created = create_review(&repo, &user(1, UserRole::Customer), form()).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.review, "Great product!");
    }

    #[test]
    fn missing_product_writes_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().returning(|_| Ok(None));
        repo.expect_create_review().times(0);

        match create_review(&repo, &user(1, UserRole::Customer), form()) {
            Err(ServiceError::NotFound(message)) => {
                assert_eq!(message, "Product not found with id 1")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn invalid_review_is_rejected_before_lookup() {
        let mut repo = MockRepository::new();
        repo.expect_get_product_by_id().times(0);
        repo.expect_create_review().times(0);
        let mut bad = form();
        bad.rating = Some(0);

        assert!(matches!(
            create_review(&repo, &user(1, UserRole::Customer), bad),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn lists_reviews_in_repository_order() {
        let mut repo = MockRepository::new();
        repo.expect_list_product_reviews()
            .with(eq(ProductId::new(1).unwrap()))
            .returning(|_| Ok(vec![review(2), review(1)]));

        let reviews = list_product_reviews(&repo, 1).unwrap();
        let ids: Vec<i32> = reviews.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
