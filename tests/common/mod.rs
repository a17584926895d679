#![allow(dead_code)]

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use sonata_shop::db::{DbPool, establish_connection_pool};
use sonata_shop::domain::product::{NewProduct, Product};
use sonata_shop::domain::types::{
    CategoryName, ColorName, DiscountPercent, PersonName, Price, ProductTitle, SizeName,
    StockQuantity, UserEmail,
};
use sonata_shop::domain::user::{NewUser, User, UserRole};
use sonata_shop::repository::{DieselRepository, ProductWriter, UserWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");

        let mut pooled = pool.get().expect("get connection");
        let conn: &mut SqliteConnection = &mut pooled;
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

#[allow(clippy::too_many_arguments)]
pub fn new_product(
    title: &str,
    category: &str,
    color: &str,
    size: &str,
    price: i32,
    discount: i32,
    quantity: i32,
) -> NewProduct {
    NewProduct::new(
        ProductTitle::new(title).unwrap(),
        format!("{title} description"),
        Price::new(price).unwrap(),
        DiscountPercent::new(discount).unwrap(),
        StockQuantity::new(quantity).unwrap(),
        None,
        ColorName::new(color).unwrap(),
        SizeName::new(size).unwrap(),
        None,
        CategoryName::new(category).unwrap(),
    )
}

/// Inserts the catalog fixture. Ids are assigned 1..=6 in this order.
///
/// | id | title               | category    | color | size | price | disc | discounted | qty |
/// |----|---------------------|-------------|-------|------|-------|------|------------|-----|
/// | 1  | Test Product        | Electronics | Black | L    | 150   | 10   | 135        | 5   |
/// | 2  | Budget Phone        | Electronics | Red   | M    | 90    | 0    | 90         | 0   |
/// | 3  | Premium Laptop      | Electronics | Black | XL   | 1000  | 20   | 800        | 2   |
/// | 4  | Reading Lamp        | Home        | White | M    | 300   | 50   | 150        | 3   |
/// | 5  | Wireless Headphones | Electronics | Blue  | L    | 400   | 15   | 340        | 0   |
/// | 6  | Desk Lamp           | Home        | White | S    | 150   | 0    | 150        | 1   |
pub fn seed_catalog(repo: &DieselRepository) -> Vec<Product> {
    [
        new_product("Test Product", "Electronics", "Black", "L", 150, 10, 5),
        new_product("Budget Phone", "Electronics", "Red", "M", 90, 0, 0),
        new_product("Premium Laptop", "Electronics", "Black", "XL", 1000, 20, 2),
        new_product("Reading Lamp", "Home", "White", "M", 300, 50, 3),
        new_product("Wireless Headphones", "Electronics", "Blue", "L", 400, 15, 0),
        new_product("Desk Lamp", "Home", "White", "S", 150, 0, 1),
    ]
    .iter()
    .map(|product| repo.create_product(product).expect("insert product"))
    .collect()
}

pub fn seed_user(repo: &DieselRepository, email: &str, role: UserRole) -> User {
    let new_user = NewUser::new(
        PersonName::new("Test").unwrap(),
        PersonName::new("User").unwrap(),
        UserEmail::new(email).unwrap(),
        role,
        None,
    );
    repo.create_user(&new_user).expect("insert user")
}
