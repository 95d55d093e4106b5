use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storekeep_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use storekeep_events::{Command, Event};

use crate::promotion::Promotion;

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Stock-tracking behavior of a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Physical goods with a tracked stock level.
    Standard,
    /// Intangible goods (licenses, services); quantity is not tracked.
    NonStocked,
    /// Stocked goods with a per-order purchase cap.
    Limited { maximum: i64 },
}

impl ProductKind {
    /// Whether purchases check and consume a tracked stock level.
    pub fn tracks_stock(&self) -> bool {
        !matches!(self, ProductKind::NonStocked)
    }
}

/// Aggregate root: Product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    quantity: i64,
    active: bool,
    promotion: Option<Promotion>,
    kind: ProductKind,
    version: u64,
    created: bool,
}

impl Product {
    /// Create an empty, not-yet-registered aggregate instance.
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            price: 0.0,
            quantity: 0,
            active: false,
            promotion: None,
            kind: ProductKind::Standard,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ProductKind::NonStocked => {
                write!(f, "{} (Non-Stocked), Price: {}", self.name, self.price)?;
            }
            ProductKind::Limited { maximum } => {
                write!(
                    f,
                    "{} (Limited to {} per order), Price: {}, Quantity: {}",
                    self.name, maximum, self.price, self.quantity
                )?;
            }
            ProductKind::Standard => {
                write!(
                    f,
                    "{}, Price: {}, Quantity: {}",
                    self.name, self.price, self.quantity
                )?;
            }
        }
        if let Some(promotion) = &self.promotion {
            write!(f, " (Promotion: {})", promotion.name())?;
        }
        Ok(())
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterProduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterProduct {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub kind: ProductKind,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetQuantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub product_id: ProductId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ActivateProduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivateProduct {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeactivateProduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeactivateProduct {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AttachPromotion (replaces any existing promotion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachPromotion {
    pub product_id: ProductId,
    pub promotion: Promotion,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub product_id: ProductId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductCommand {
    RegisterProduct(RegisterProduct),
    SetQuantity(SetQuantity),
    ActivateProduct(ActivateProduct),
    DeactivateProduct(DeactivateProduct),
    AttachPromotion(AttachPromotion),
    Purchase(Purchase),
}

impl ProductCommand {
    pub fn product_id(&self) -> ProductId {
        match self {
            ProductCommand::RegisterProduct(c) => c.product_id,
            ProductCommand::SetQuantity(c) => c.product_id,
            ProductCommand::ActivateProduct(c) => c.product_id,
            ProductCommand::DeactivateProduct(c) => c.product_id,
            ProductCommand::AttachPromotion(c) => c.product_id,
            ProductCommand::Purchase(c) => c.product_id,
        }
    }
}

impl Command for ProductCommand {
    fn target_aggregate_id(&self) -> AggregateId {
        self.product_id().0
    }
}

/// Event: ProductRegistered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRegistered {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub kind: ProductKind,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantitySet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySet {
    pub product_id: ProductId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductActivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductActivated {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDeactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDeactivated {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PromotionAttached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionAttached {
    pub product_id: ProductId,
    pub promotion: Promotion,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductPurchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPurchased {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Promotion-adjusted line total settled at purchase time.
    pub total_price: f64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductRegistered(ProductRegistered),
    QuantitySet(QuantitySet),
    ProductActivated(ProductActivated),
    ProductDeactivated(ProductDeactivated),
    PromotionAttached(PromotionAttached),
    ProductPurchased(ProductPurchased),
}

impl Event for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductRegistered(_) => "catalog.product.registered",
            ProductEvent::QuantitySet(_) => "catalog.product.quantity_set",
            ProductEvent::ProductActivated(_) => "catalog.product.activated",
            ProductEvent::ProductDeactivated(_) => "catalog.product.deactivated",
            ProductEvent::PromotionAttached(_) => "catalog.product.promotion_attached",
            ProductEvent::ProductPurchased(_) => "catalog.product.purchased",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductRegistered(e) => e.occurred_at,
            ProductEvent::QuantitySet(e) => e.occurred_at,
            ProductEvent::ProductActivated(e) => e.occurred_at,
            ProductEvent::ProductDeactivated(e) => e.occurred_at,
            ProductEvent::PromotionAttached(e) => e.occurred_at,
            ProductEvent::ProductPurchased(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::ProductRegistered(e) => {
                self.id = e.product_id;
                self.name = e.name.clone();
                self.price = e.price;
                self.quantity = e.quantity;
                // Registration always starts active, even at quantity 0.
                // Only the quantity paths below ever deactivate.
                self.active = true;
                self.promotion = None;
                self.kind = e.kind;
                self.created = true;
            }
            ProductEvent::QuantitySet(e) => {
                self.quantity = e.quantity;
                if self.quantity == 0 {
                    self.active = false;
                }
            }
            ProductEvent::ProductActivated(_) => {
                self.active = true;
            }
            ProductEvent::ProductDeactivated(_) => {
                self.active = false;
            }
            ProductEvent::PromotionAttached(e) => {
                // Last attached promotion wins.
                self.promotion = Some(e.promotion.clone());
            }
            ProductEvent::ProductPurchased(e) => {
                if self.kind.tracks_stock() {
                    self.quantity -= e.quantity;
                    if self.quantity == 0 {
                        self.active = false;
                    }
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::RegisterProduct(cmd) => self.handle_register(cmd),
            ProductCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
            ProductCommand::ActivateProduct(cmd) => self.handle_activate(cmd),
            ProductCommand::DeactivateProduct(cmd) => self.handle_deactivate(cmd),
            ProductCommand::AttachPromotion(cmd) => self.handle_attach_promotion(cmd),
            ProductCommand::Purchase(cmd) => self.handle_purchase(cmd),
        }
    }
}

impl Product {
    fn ensure_product_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        if self.id != product_id {
            return Err(DomainError::invalid_argument("product_id mismatch"));
        }
        Ok(())
    }

    fn ensure_registered(&self, product_id: ProductId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_product_id(product_id)
    }

    fn handle_register(&self, cmd: &RegisterProduct) -> Result<Vec<ProductEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("product already registered"));
        }

        if cmd.name.trim().is_empty() {
            return Err(DomainError::invalid_argument("name cannot be empty"));
        }

        if !cmd.price.is_finite() || cmd.price < 0.0 {
            return Err(DomainError::invalid_argument("price cannot be negative"));
        }

        if cmd.quantity < 0 {
            return Err(DomainError::invalid_argument("quantity cannot be negative"));
        }

        match cmd.kind {
            ProductKind::NonStocked if cmd.quantity != 0 => {
                return Err(DomainError::invalid_argument(
                    "non-stocked products do not track quantity",
                ));
            }
            ProductKind::Limited { maximum } if maximum <= 0 => {
                return Err(DomainError::invalid_argument(
                    "per-order maximum must be positive",
                ));
            }
            _ => {}
        }

        Ok(vec![ProductEvent::ProductRegistered(ProductRegistered {
            product_id: cmd.product_id,
            name: cmd.name.clone(),
            price: cmd.price,
            quantity: cmd.quantity,
            kind: cmd.kind,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_quantity(&self, cmd: &SetQuantity) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_registered(cmd.product_id)?;

        if !self.kind.tracks_stock() {
            return Err(DomainError::invalid_operation(
                "quantity cannot be set for non-stocked products",
            ));
        }

        if cmd.quantity < 0 {
            return Err(DomainError::invalid_argument("quantity cannot be negative"));
        }

        Ok(vec![ProductEvent::QuantitySet(QuantitySet {
            product_id: cmd.product_id,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_activate(&self, cmd: &ActivateProduct) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_registered(cmd.product_id)?;

        // Unconditional flag flip; no quantity side effects.
        Ok(vec![ProductEvent::ProductActivated(ProductActivated {
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deactivate(
        &self,
        cmd: &DeactivateProduct,
    ) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_registered(cmd.product_id)?;

        Ok(vec![ProductEvent::ProductDeactivated(ProductDeactivated {
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_attach_promotion(
        &self,
        cmd: &AttachPromotion,
    ) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_registered(cmd.product_id)?;

        Ok(vec![ProductEvent::PromotionAttached(PromotionAttached {
            product_id: cmd.product_id,
            promotion: cmd.promotion.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_purchase(&self, cmd: &Purchase) -> Result<Vec<ProductEvent>, DomainError> {
        self.ensure_registered(cmd.product_id)?;

        if cmd.quantity <= 0 {
            return Err(DomainError::invalid_argument(
                "purchase quantity must be greater than zero",
            ));
        }

        // The per-order cap is checked before stock.
        if let ProductKind::Limited { maximum } = self.kind {
            if cmd.quantity > maximum {
                return Err(DomainError::limit_exceeded(format!(
                    "cannot purchase more than {} of {} in one order",
                    maximum, self.name
                )));
            }
        }

        if self.kind.tracks_stock() && cmd.quantity > self.quantity {
            return Err(DomainError::out_of_stock(format!(
                "not enough {} available: requested {}, available {}",
                self.name, cmd.quantity, self.quantity
            )));
        }

        let total_price = match &self.promotion {
            Some(promotion) => promotion.total_price(self.price, cmd.quantity),
            None => self.price * cmd.quantity as f64,
        };

        Ok(vec![ProductEvent::ProductPurchased(ProductPurchased {
            product_id: cmd.product_id,
            quantity: cmd.quantity,
            total_price,
            occurred_at: cmd.occurred_at,
        })])
    }
}
