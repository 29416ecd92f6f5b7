//! Media entity - Files attached to a model under a named collection.
//!
//! Rows are polymorphic: `model_type` names the owning table and `model_id` its row.
//! Files within a collection are ordered by `order_column`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored media file
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    /// Unique identifier of the file
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning table, e.g. `"products"`
    pub model_type: String,
    /// Owning row
    pub model_id: i64,
    /// Collection name, e.g. `"imgs_party"`
    pub collection_name: String,
    /// Original file name
    pub file_name: String,
    /// Position within the collection, ascending
    pub order_column: i32,
    /// When the file was attached
    pub created_at: DateTimeUtc,
}

/// Media rows are resolved through explicit lookups, not relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
