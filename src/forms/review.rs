use serde::Deserialize;
use validator::Validate;

use crate::domain::review::NewReview;
use crate::domain::types::{ProductId, Rating, ReviewText, UserId};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Review submitted by an authenticated user.
pub struct ReviewForm {
    pub product_id: i32,
    #[validate(length(min = 1))]
    pub review: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
}

impl ReviewForm {
    pub fn product_id(&self) -> Result<ProductId, FormError> {
        Ok(ProductId::new(self.product_id)?)
    }

    /// Validates the payload and attributes it to `user_id`.
    pub fn into_new_review(self, user_id: UserId) -> Result<NewReview, FormError> {
        self.validate()?;
        Ok(NewReview::new(
            self.product_id()?,
            user_id,
            ReviewText::new(self.review)?,
            self.rating.map(Rating::new).transpose()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_review_for_user() {
        let form = ReviewForm {
            product_id: 1,
            review: "Great product!".into(),
            rating: Some(4),
        };
        let review = form.into_new_review(UserId::new(7).unwrap()).unwrap();
        assert_eq!(review.product_id.get(), 1);
        assert_eq!(review.user_id.get(), 7);
        assert_eq!(review.rating.map(Rating::get), Some(4));
    }

    #[test]
    fn rejects_out_of_range_rating_and_empty_text() {
        let form = ReviewForm {
            product_id: 1,
            review: "ok".into(),
            rating: Some(9),
        };
        assert!(matches!(
            form.into_new_review(UserId::new(1).unwrap()),
            Err(FormError::Validation(_))
        ));

        let form = ReviewForm {
            product_id: 1,
            review: "<script>x</script>".into(),
            rating: None,
        };
        assert!(matches!(
            form.into_new_review(UserId::new(1).unwrap()),
            Err(FormError::Constraint(_))
        ));
    }
}
