use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};
use crate::domain::types::{ProductId, Rating, ReviewId, ReviewText, TypeConstraintError, UserId};
use crate::models::product::Product;
use crate::models::user::User;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = crate::schema::reviews)]
/// Diesel model for [`crate::domain::review::Review`].
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub review: String,
    pub rating: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
/// Insertable form of [`Review`].
pub struct NewReview<'a> {
    pub product_id: i32,
    pub user_id: i32,
    pub review: &'a str,
    pub rating: Option<i32>,
}

impl TryFrom<Review> for DomainReview {
    type Error = TypeConstraintError;

    fn try_from(review: Review) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ReviewId::try_from(review.id)?,
            product_id: ProductId::try_from(review.product_id)?,
            user_id: UserId::try_from(review.user_id)?,
            review: ReviewText::new(review.review)?,
            rating: review.rating.map(Rating::new).transpose()?,
            created_at: review.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewReview> for NewReview<'a> {
    fn from(review: &'a DomainNewReview) -> Self {
        Self {
            product_id: review.product_id.get(),
            user_id: review.user_id.get(),
            review: review.review.as_str(),
            rating: review.rating.map(Rating::get),
        }
    }
}
