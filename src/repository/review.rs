use diesel::prelude::*;

use crate::domain::review::{NewReview, Review};
use crate::domain::types::ProductId;
use crate::models::review::{NewReview as DbNewReview, Review as DbReview};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ReviewReader, ReviewWriter};

impl ReviewReader for DieselRepository {
    fn list_product_reviews(&self, product_id: ProductId) -> RepositoryResult<Vec<Review>> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;
        let rows = reviews::table
            .filter(reviews::product_id.eq(product_id.get()))
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .load::<DbReview>(&mut conn)?;

        rows.into_iter()
            .map(|row| Review::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review> {
        use crate::schema::{products, reviews};

        let mut conn = self.conn()?;
        let insertable = DbNewReview::from(new_review);

        let row = conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::insert_into(reviews::table)
                .values(&insertable)
                .get_result::<DbReview>(conn)?;

            if let Some(rating) = new_review.rating {
                let updated = diesel::update(products::table.find(new_review.product_id.get()))
                    .set((
                        products::num_ratings.eq(products::num_ratings + 1),
                        products::rating_total.eq(products::rating_total + rating.get()),
                    ))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(RepositoryError::NotFound);
                }
            }

            Ok(row)
        })?;

        Ok(Review::try_from(row)?)
    }
}
