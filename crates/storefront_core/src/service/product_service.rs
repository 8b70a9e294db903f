//! Product use-case service.

use crate::model::{EntityKind, NewProduct, Product, ProductId};
use crate::repo::product_repo::ProductRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;

/// Use-case service wrapper for product CRUD operations.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_products(&self) -> RepoResult<Vec<Product>> {
        self.repo.list_products()
    }

    pub fn get_product(&self, id: ProductId) -> RepoResult<Product> {
        self.repo.get_product(id)?.ok_or(RepoError::NotFound {
            kind: EntityKind::Product,
            id,
        })
    }

    pub fn create_product(&self, product: &NewProduct) -> RepoResult<Product> {
        let created = self.repo.create_product(product)?;
        info!(
            "event=product_create module=service status=ok product_id={}",
            created.id
        );
        Ok(created)
    }

    pub fn update_product(&self, id: ProductId, product: &NewProduct) -> RepoResult<Product> {
        self.repo.update_product(id, product)
    }

    /// Deletes a product and unlinks it from every order.
    pub fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        self.repo.delete_product(id)?;
        info!("event=product_delete module=service status=ok product_id={id}");
        Ok(())
    }
}
