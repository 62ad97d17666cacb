//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services do no I/O - the render surface is reached by callers
//! through the ports.
//!
//! - [`store`] - Reactive store broadcasting snapshots to listeners
//! - [`validation`] - Declarative per-field validation registry
//! - [`drag`] - Drag exchange protocol between board columns

pub mod drag;
pub mod store;
pub mod validation;

pub use drag::{CancelReason, Container, DragExchange, DragPayload, DragState, TEXT_PLAIN, Transition};
pub use store::{DEFAULT_ID_PREFIX, Entity, ReactiveStore, Snapshot, SubscriptionId};
pub use validation::{
    FieldInput, FieldValue, FieldValues, SchemaBuilder, SchemaError, ValidationRegistry, ValidationReport,
    Violation,
};
