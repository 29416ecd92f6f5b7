//! Review entity - Feedback left on a product.
//!
//! The `reviews` table is owned by the migrations in [`crate::migrations`], which is
//! where the `platform` column is added.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    /// Unique identifier of the review
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Reviewed product
    pub product_id: i64,
    /// Author, if known
    pub user_id: Option<i64>,
    /// Review text
    pub content: String,
    /// Where the review was written (e.g. `"naver"`), absent for older rows
    pub platform: Option<String>,
    /// When the review was written
    pub created_at: DateTimeUtc,
}

/// Defines the relationship between Review and Product
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
