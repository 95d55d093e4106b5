use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use storekeep_core::{DomainResult, ValueObject};
use storekeep_products::{Catalog, ProductCommand, ProductEvent, ProductId, Purchase};

/// One (product, quantity) request within a multi-item order.
///
/// Order lines are ephemeral: they exist for the duration of a single
/// `place_order` call and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

impl ValueObject for OrderLine {}

/// Validate and fulfill a multi-item order against the catalog.
///
/// Lines settle strictly in the given order, each as a purchase against its
/// product. The first failing line (unknown product, invalid quantity,
/// insufficient stock, per-order maximum exceeded) aborts the order and
/// propagates its error; lines settled before it stay committed — there is
/// no rollback in this single-pass in-memory model.
///
/// Returns the sum of all line totals on success. Repeated lines against
/// the same product consume its stock cumulatively.
pub fn place_order(
    catalog: &mut Catalog,
    lines: &[OrderLine],
    occurred_at: DateTime<Utc>,
) -> DomainResult<f64> {
    let mut total = 0.0;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let events = catalog
            .execute(ProductCommand::Purchase(Purchase {
                product_id: line.product_id,
                quantity: line.quantity,
                occurred_at,
            }))
            .inspect_err(|err| {
                warn!(
                    line_no,
                    product_id = %line.product_id,
                    quantity = line.quantity,
                    error = %err,
                    "order aborted at failing line"
                );
            })?;

        for event in &events {
            if let ProductEvent::ProductPurchased(e) = event {
                debug!(
                    line_no,
                    product_id = %e.product_id,
                    quantity = e.quantity,
                    total_price = e.total_price,
                    "order line settled"
                );
                total += e.total_price;
            }
        }
    }

    Ok(total)
}
