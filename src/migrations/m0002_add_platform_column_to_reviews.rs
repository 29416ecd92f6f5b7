//! Adds the nullable `platform` column to `reviews`. No default, no backfill.

use crate::entities::{Review, review};
use sea_orm_migration::prelude::*;

/// Adds `reviews.platform`; reverting drops it.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Review)
                    .add_column(ColumnDef::new(review::Column::Platform).string().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Review)
                    .drop_column(review::Column::Platform)
                    .to_owned(),
            )
            .await
    }
}
