//! User entity - Participants who place orders.
//!
//! Only the fields the catalog needs are modelled here; the user's `sex` drives the
//! per-sex acceptance counters shown on each product.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sex of a participant, stored as a short string
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Counted in `accept_women`
    #[sea_orm(string_value = "women")]
    Women,
    /// Counted in `accept_men`
    #[sea_orm(string_value = "men")]
    Men,
}

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Drives the per-sex acceptance counters
    pub sex: Sex,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user places many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
