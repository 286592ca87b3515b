// assay-core/src/domain/catalog/mod.rs
//
// Static rule catalogs: immutable data tables constructed at compile time.
// A new signal or field is added by appending a record, never by subclassing.

pub mod fields;
pub mod signals;

// Re-exports
pub use fields::{FieldDefinition, SignalContribution, field_by_id, fields_for_signal};
pub use signals::{AggregationMethod, CanonicalSignal, SeverityTier, SignalDefinition};
