//! Unified error type for the catalog.

use thiserror::Error;

/// Every failure a catalog operation can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or administrative input
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Any database failure not covered by a more specific variant
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No product with this id, or it is soft-deleted where a live one is required
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Requested product id
        id: i64,
    },

    /// No order with this id
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Requested order id
        id: i64,
    },

    /// A negative price
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// Rejected price
        price: i64,
    },

    /// A negative capacity, or an order count below 1
    #[error("Invalid count: {count}")]
    InvalidCount {
        /// Rejected count
        count: i64,
    },

    /// Attempt to edit a row copied at order time
    #[error("Order snapshots cannot be modified (product {id})")]
    SnapshotImmutable {
        /// The snapshot's id
        id: i64,
    },

    /// A snapshot row could not be written; the whole snapshot was rolled back
    #[error("Failed to create order snapshot of product {product_id}: {source}")]
    SnapshotFailed {
        /// Product being copied
        product_id: i64,
        /// Underlying insert failure
        #[source]
        source: sea_orm::DbErr,
    },

    /// A schema migration failed
    #[error("Migration {name} failed: {source}")]
    Migration {
        /// Name of the failing migration
        name: String,
        /// Underlying failure
        #[source]
        source: sea_orm::DbErr,
    },

    /// JSON encoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File system failure, e.g. reading the config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
