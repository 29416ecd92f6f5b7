//! Core business logic - framework-agnostic catalog operations.

/// Derived product attributes and the internal product view
pub mod attributes;
/// Catalog search filter
pub mod filter;
/// Product-to-order association
pub mod order;
/// Product CRUD, kinds, and soft deletion
pub mod product;
/// External JSON projection
pub mod resource;
/// Order-time product snapshots
pub mod snapshot;
