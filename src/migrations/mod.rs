//! Schema migrations for tables not generated from entities.
//!
//! `sea-orm-migration` records applied migrations in `seaql_migrations`, so
//! [`run_pending`] only applies what has not run yet. [`Migrator`] also exposes the
//! usual `MigratorTrait` operations (`down`, `status`, `refresh`).

/// Creates the `reviews` table
pub mod m0001_create_reviews_table;
/// Adds `reviews.platform`
pub mod m0002_add_platform_column_to_reviews;

use crate::errors::{Error, Result};
use sea_orm::DatabaseConnection;
use sea_orm_migration::prelude::{MigrationTrait, MigratorTrait, async_trait};
use tracing::info;

/// The catalog's migrations, oldest first.
#[derive(Clone, Copy, Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m0001_create_reviews_table::Migration),
            Box::new(m0002_add_platform_column_to_reviews::Migration),
        ]
    }
}

/// Applies every pending migration, one at a time, and returns the names applied.
///
/// # Errors
/// Returns [`Error::Migration`] naming the migration that failed. Migrations applied
/// before it stay applied.
pub async fn run_pending(db: &DatabaseConnection) -> Result<Vec<String>> {
    let pending: Vec<String> = Migrator::get_pending_migrations(db)
        .await?
        .iter()
        .map(|migration| migration.name().to_string())
        .collect();

    for name in &pending {
        Migrator::up(db, Some(1))
            .await
            .map_err(|source| Error::Migration {
                name: name.clone(),
                source,
            })?;
        info!(migration = %name, "Applied migration");
    }

    Ok(pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Review, review};
    use crate::test_utils::*;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};
    use sea_orm_migration::prelude::SchemaManager;

    async fn insert_review(
        db: &DatabaseConnection,
        product_id: i64,
        platform: Option<&str>,
    ) -> Result<review::Model> {
        review::ActiveModel {
            product_id: Set(product_id),
            user_id: Set(None),
            content: Set("Great night".to_string()),
            platform: Set(platform.map(ToString::to_string)),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Into::into)
    }

    #[tokio::test]
    async fn test_run_pending_applies_once() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(Migrator::get_pending_migrations(&db).await?.len(), 2);

        let ran = run_pending(&db).await?;
        assert_eq!(
            ran,
            ["m0001_create_reviews_table", "m0002_add_platform_column_to_reviews"]
        );

        // Nothing left to run
        assert!(run_pending(&db).await?.is_empty());
        assert_eq!(Migrator::get_applied_migrations(&db).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_platform_column_round_trip() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        run_pending(&db).await?;

        let review = insert_review(&db, product.id, Some("naver")).await?;
        assert_eq!(review.platform.as_deref(), Some("naver"));
        // Nullable, no default
        let review = insert_review(&db, product.id, None).await?;
        assert!(review.platform.is_none());

        Migrator::down(&db, Some(1)).await?;
        let manager = SchemaManager::new(&db);
        assert!(!manager.has_column("reviews", "platform").await?);
        assert!(manager.has_table("reviews").await?);
        // The entity still selects `platform`, which no longer exists
        assert!(Review::find().all(&db).await.is_err());

        // Re-applying restores the column; existing rows read back as null
        assert_eq!(run_pending(&db).await?, ["m0002_add_platform_column_to_reviews"]);
        let reviews = Review::find().all(&db).await?;
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.platform.is_none()));

        Ok(())
    }
}
