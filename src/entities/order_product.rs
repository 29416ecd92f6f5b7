//! Order/product pivot entity.
//!
//! Besides the two linked ids each row carries the participant (`user_id`), the
//! pivot-level `state`, whether the participant confirmed (`accept`), and a
//! free-form `partner` attribute.

use super::order::OrderState;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pivot row linking a product to an order
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_product")]
pub struct Model {
    /// Unique identifier of the pivot row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Linked order
    pub order_id: i64,
    /// Linked product
    pub product_id: i64,
    /// Participant this row is for
    pub user_id: i64,
    /// Pivot-level state
    pub state: OrderState,
    /// Whether the named user accepted participation
    pub accept: bool,
    /// Free-form partner attribute
    pub partner: Option<String>,
}

/// Defines relationships between the pivot and the linked entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each row belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    /// Each row belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
