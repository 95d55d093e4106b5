use storekeep_core::{Aggregate, DomainError, DomainResult};

use crate::product::{Product, ProductCommand, ProductEvent, ProductId};

/// The ordered collection of all products known to the store.
///
/// Products keep their insertion order for listing. The catalog is plain
/// owned state: callers thread it explicitly through operations instead of
/// reaching for a global, which keeps tests isolated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All products, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Sum of all product quantities.
    pub fn total_quantity(&self) -> i64 {
        self.products.iter().map(Product::quantity).sum()
    }

    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == product_id)
    }

    /// Route a command to its target aggregate, apply the resulting events
    /// and return them.
    ///
    /// `RegisterProduct` creates the aggregate (duplicate ids conflict);
    /// every other command requires the target to exist.
    pub fn execute(&mut self, command: ProductCommand) -> DomainResult<Vec<ProductEvent>> {
        let product_id = command.product_id();

        match command {
            ProductCommand::RegisterProduct(_) => {
                if self.product(product_id).is_some() {
                    return Err(DomainError::conflict("product already registered"));
                }
                let mut product = Product::empty(product_id);
                let events = product.handle(&command)?;
                for event in &events {
                    product.apply(event);
                }
                self.products.push(product);
                Ok(events)
            }
            _ => {
                let product = self
                    .products
                    .iter_mut()
                    .find(|p| p.id_typed() == product_id)
                    .ok_or_else(DomainError::not_found)?;
                let events = product.handle(&command)?;
                for event in &events {
                    product.apply(event);
                }
                Ok(events)
            }
        }
    }
}
