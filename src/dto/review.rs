use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::review::Review;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub review: String,
    pub rating: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.get(),
            product_id: review.product_id.get(),
            user_id: review.user_id.get(),
            review: review.review.into_inner(),
            rating: review.rating.map(|rating| rating.get()),
            created_at: review.created_at,
        }
    }
}
