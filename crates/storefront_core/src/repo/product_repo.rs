//! Product repository contract and SQLite implementation.
//!
//! Deleting a product also drops its `order_product` links (cascade).

use crate::model::{EntityKind, NewProduct, Product, ProductId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const PRODUCT_SELECT_SQL: &str = "SELECT id, product_name, price FROM products";

/// Repository interface for product CRUD operations.
pub trait ProductRepository {
    fn list_products(&self) -> RepoResult<Vec<Product>>;
    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>>;
    fn create_product(&self, product: &NewProduct) -> RepoResult<Product>;
    fn update_product(&self, id: ProductId, product: &NewProduct) -> RepoResult<Product>;
    fn delete_product(&self, id: ProductId) -> RepoResult<()>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY id ASC;"))?;
        let products = stmt
            .query_map([], parse_product_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(products)
    }

    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }

        Ok(None)
    }

    fn create_product(&self, product: &NewProduct) -> RepoResult<Product> {
        product.validate()?;

        self.conn.execute(
            "INSERT INTO products (product_name, price) VALUES (?1, ?2);",
            params![product.product_name, product.price],
        )?;

        Ok(product
            .clone()
            .into_product(self.conn.last_insert_rowid()))
    }

    fn update_product(&self, id: ProductId, product: &NewProduct) -> RepoResult<Product> {
        product.validate()?;

        let changed = self.conn.execute(
            "UPDATE products
             SET
                product_name = ?1,
                price = ?2
             WHERE id = ?3;",
            params![product.product_name, product.price, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Product,
                id,
            });
        }

        Ok(product.clone().into_product(id))
    }

    fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Product,
                id,
            });
        }

        Ok(())
    }
}

pub(crate) fn parse_product_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get("id")?,
        product_name: row.get("product_name")?,
        price: row.get("price")?,
    })
}
