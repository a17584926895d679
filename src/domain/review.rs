use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProductId, Rating, ReviewId, ReviewText, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub review: ReviewText,
    pub rating: Option<Rating>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub review: ReviewText,
    /// When present, folded into the product's rating aggregate.
    pub rating: Option<Rating>,
}

impl NewReview {
    #[must_use]
    pub fn new(
        product_id: ProductId,
        user_id: UserId,
        review: ReviewText,
        rating: Option<Rating>,
    ) -> Self {
        Self {
            product_id,
            user_id,
            review,
            rating,
        }
    }
}
