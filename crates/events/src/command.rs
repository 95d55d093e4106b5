use storekeep_core::AggregateId;

/// A command targets a specific aggregate.
///
/// Commands represent **intent** - a request to perform an action on an
/// aggregate. They are **transient** (not persisted) and are transformed
/// into events.
///
/// ## Command vs Event
///
/// - **Command**: Intent to do something (e.g., "Purchase 3 units")
/// - **Event**: Fact that something happened (e.g., "ProductPurchased { quantity: 3 }")
///
/// Commands are rejected if invalid. Events represent accepted changes.
///
/// ## Aggregate Targeting
///
/// Commands must specify which aggregate they target via
/// `target_aggregate_id()`, so a catalog (or any other holder of
/// aggregates) can route each command to the correct instance.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_aggregate_id(&self) -> AggregateId;
}
