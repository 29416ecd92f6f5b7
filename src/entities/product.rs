//! Product entity - Represents catalog products, their options, and order-time copies.
//!
//! A single table holds three kinds of rows. Catalog products have neither
//! `product_id` nor `origin_product_id`. Options point at their parent through
//! `product_id`. Order snapshots point at the row they were copied from through
//! `origin_product_id`. See [`crate::core::product::ProductKind`] for the typed view.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Parent product if this row is an option of another product
    pub product_id: Option<i64>,
    /// Product this row was copied from at order time
    pub origin_product_id: Option<i64>,
    /// Display title of the product
    pub title: String,
    /// Unit price in the smallest currency unit
    pub price: i64,
    /// Number of dating rounds offered at the party
    pub count_dating: Option<i32>,
    /// When the party opens
    pub opened_at: Option<DateTimeUtc>,
    /// Venue area
    pub place: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Venue name
    pub place_name: Option<String>,
    /// Accepted age range, free-form (e.g. `"25-35"`)
    pub age: Option<String>,
    /// Maximum number of women accepted
    pub max_women: Option<i32>,
    /// Maximum number of men accepted
    pub max_men: Option<i32>,
    /// Instructions every participant must follow
    pub must_do: Option<String>,
    /// Category used by catalog filtering
    pub category_id: Option<i64>,
    /// Sub-category used by catalog filtering
    pub sub_category_id: Option<i64>,
    /// Mood used by catalog filtering
    pub mood_id: Option<i64>,
    /// Usage used by catalog filtering
    pub usage_id: Option<i64>,
    /// External link shown by the public projection
    pub url: Option<String>,
    /// Hidden products are excluded from public listings
    pub hide: bool,
    /// True for rows created as order snapshots
    pub for_order: bool,
    /// Ordered quantity, only meaningful on order snapshots
    pub count: Option<i64>,
    /// Chosen color, only meaningful on order snapshots
    pub color: Option<String>,
    /// Soft delete flag - if true, product is hidden but data is preserved
    pub is_deleted: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A product is linked to orders through the `order_product` pivot
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProducts,
    /// A product has many reviews
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_product::Relation::Order.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_product::Relation::Product.def().rev())
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
