//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::review::{NewReview, Review};
use crate::domain::types::{ProductId, UserEmail, UserId};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ProductListQuery, ProductReader, ProductWriter, ReviewReader, ReviewWriter, UserReader,
    UserWriter,
};

mock! {
    pub Repository {}

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
        fn list_products(
            &self,
            query: &ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)>;
        fn list_all_products(&self) -> RepositoryResult<Vec<Product>>;
        fn search_products(&self, term: &str) -> RepositoryResult<Vec<Product>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(
            &self,
            id: ProductId,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product>;
        fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
    }

    impl ReviewReader for Repository {
        fn list_product_reviews(&self, product_id: ProductId) -> RepositoryResult<Vec<Review>>;
    }

    impl ReviewWriter for Repository {
        fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }
}
