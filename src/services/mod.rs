//! Business rules sitting between the HTTP routes and the repositories.

use thiserror::Error;

use crate::domain::product_filter::ProductQueryError;
use crate::domain::types::TypeConstraintError;
use crate::domain::user::User;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod product;
pub mod review;
pub mod user;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Query(#[from] ProductQueryError),
    #[error("{0}")]
    Form(String),
    #[error("{0}")]
    TypeConstraint(String),
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound(err.to_string()),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Fails with [`ServiceError::Forbidden`] unless the user is an administrator.
pub fn ensure_admin(user: &User) -> ServiceResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

/// Logs failures the caller cannot fix before handing them back.
pub(crate) fn log_internal(context: &str, err: ServiceError) -> ServiceError {
    if let ServiceError::Repository(inner) = &err {
        log::error!("{context}: {inner}");
    }
    err
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;

    use crate::domain::product::Product;
    use crate::domain::types::{
        CategoryName, ColorName, DiscountPercent, PersonName, Price, ProductId, ProductTitle,
        SizeName, StockQuantity, UserEmail, UserId,
    };
    use crate::domain::user::{User, UserRole};

    pub fn user(id: i32, role: UserRole) -> User {
        User {
            id: UserId::new(id).unwrap(),
            first_name: PersonName::new("Test").unwrap(),
            last_name: PersonName::new("User").unwrap(),
            email: UserEmail::new(format!("user{id}@example.com")).unwrap(),
            role,
            mobile: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn product(id: i32, title: &str) -> Product {
        let now = Utc::now().naive_utc();
        let price = Price::new(150).unwrap();
        let discount = DiscountPercent::new(10).unwrap();
        Product {
            id: ProductId::new(id).unwrap(),
            title: ProductTitle::new(title).unwrap(),
            description: "A product".to_string(),
            price,
            discounted_price: price.discounted(discount),
            discount_percent: discount,
            quantity: StockQuantity::new(5).unwrap(),
            brand: None,
            color: ColorName::new("Black").unwrap(),
            size: SizeName::new("L").unwrap(),
            image_url: None,
            category: CategoryName::new("Electronics").unwrap(),
            num_ratings: 0,
            rating_total: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
