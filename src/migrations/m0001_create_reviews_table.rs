//! Creates the `reviews` table in its original shape, without `platform`.

use crate::entities::{Product, Review, product, review};
use sea_orm_migration::prelude::*;

/// Creates `reviews` with a cascading foreign key to `products`.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(review::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(review::Column::ProductId).big_integer().not_null())
                    .col(ColumnDef::new(review::Column::UserId).big_integer().null())
                    .col(ColumnDef::new(review::Column::Content).text().not_null())
                    .col(
                        ColumnDef::new(review::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Review, review::Column::ProductId)
                            .to(Product, product::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review).if_exists().to_owned())
            .await
    }
}
