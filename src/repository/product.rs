use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::fold_case;
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::product_filter::{SortDirection, SortField, StockStatus};
use crate::domain::types::ProductId;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductListQuery, ProductReader, ProductWriter};

/// Escapes `LIKE` wildcards so the term is matched literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn to_domain(rows: Vec<DbProduct>) -> RepositoryResult<Vec<Product>> {
    rows.into_iter()
        .map(|row| Product::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .find(id.get())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product.map(Product::try_from).transpose().map_err(Into::into)
    }

    fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = products::table.into_boxed::<Sqlite>();

            if let Some(category) = &query.category {
                items = items.filter(fold_case(products::category).eq(category.clone()));
            }
            if !query.colors.is_empty() {
                let colors: Vec<String> = query.colors.iter().cloned().collect();
                items = items.filter(fold_case(products::color).eq_any(colors));
            }
            if !query.sizes.is_empty() {
                let sizes: Vec<String> = query.sizes.iter().cloned().collect();
                items = items.filter(fold_case(products::size).eq_any(sizes));
            }
            if let Some(min) = query.price.min() {
                items = items.filter(products::discounted_price.ge(min));
            }
            if let Some(max) = query.price.max() {
                items = items.filter(products::discounted_price.le(max));
            }
            if let Some(min_discount) = query.min_discount {
                items = items.filter(products::discount_percent.ge(min_discount));
            }
            match query.stock {
                StockStatus::Any => {}
                StockStatus::InStock => items = items.filter(products::quantity.gt(0)),
                StockStatus::OutOfStock => items = items.filter(products::quantity.eq(0)),
            }
            items
        };

        let sorted = || {
            let items = query_builder();
            match (query.sort.field, query.sort.direction) {
                (SortField::Default, _) => items,
                (SortField::Price, SortDirection::Ascending) => {
                    items.order_by(products::discounted_price.asc())
                }
                (SortField::Price, SortDirection::Descending) => {
                    items.order_by(products::discounted_price.desc())
                }
                (SortField::Title, SortDirection::Ascending) => {
                    items.order_by(products::title.asc())
                }
                (SortField::Title, SortDirection::Descending) => {
                    items.order_by(products::title.desc())
                }
            }
        };

        let offset = i64::try_from(query.page.offset()).unwrap_or(i64::MAX);
        let limit = i64::try_from(query.page.limit()).unwrap_or(i64::MAX);

        // Count and page share one read snapshot.
        let (total, rows) = conn.transaction::<_, RepositoryError, _>(|conn| {
            let total = query_builder().count().get_result::<i64>(conn)?;
            let rows = sorted()
                .then_order_by(products::id.asc())
                .offset(offset)
                .limit(limit)
                .load::<DbProduct>(conn)?;
            Ok((total, rows))
        })?;
        let total = usize::try_from(total).unwrap_or_default();

        Ok((total, to_domain(rows)?))
    }

    fn list_all_products(&self) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let rows = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        to_domain(rows)
    }

    fn search_products(&self, term: &str) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let pattern = like_pattern(term.trim());

        let rows = products::table
            .filter(
                fold_case(products::title)
                    .like(pattern.clone())
                    .escape('\\')
                    .or(fold_case(products::description).like(pattern).escape('\\')),
            )
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        to_domain(rows)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let insertable = DbNewProduct::from(new_product);

        let row = diesel::insert_into(products::table)
            .values(&insertable)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(Product::try_from(row)?)
    }

    fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let changeset = DbUpdateProduct::new(updates, Utc::now().naive_utc());

        let row = diesel::update(products::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbProduct>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        Ok(Product::try_from(row)?)
    }

    /// Reviews of the product go with it through `ON DELETE CASCADE`.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
