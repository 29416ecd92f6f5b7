//! Shared test utilities for the catalog.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::product::{ProductInput, create_product},
    entities::{Sex, product, user},
    errors::Result,
    media::{MediaCollection, MediaStore, StoredFile},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::collections::HashMap;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a catalog product with sensible defaults.
///
/// # Defaults
/// * price: 30000
/// * everything else unset
pub async fn create_test_product(db: &DatabaseConnection, title: &str) -> Result<product::Model> {
    create_product(db, ProductInput::new(title, 30000)).await
}

/// Creates an option of `parent_id` priced at 5000.
pub async fn create_test_option(
    db: &DatabaseConnection,
    parent_id: i64,
    title: &str,
) -> Result<product::Model> {
    let input = ProductInput {
        parent_id: Some(parent_id),
        ..ProductInput::new(title, 5000)
    };
    create_product(db, input).await
}

/// Creates a user of the given sex.
pub async fn create_test_user(db: &DatabaseConnection, name: &str, sex: Sex) -> Result<user::Model> {
    user::ActiveModel {
        name: Set(name.to_string()),
        sex: Set(sex),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Sets up a complete test environment with one catalog product.
/// Returns (db, product) for product-related tests.
pub async fn setup_with_product() -> Result<(DatabaseConnection, product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Party").await?;
    Ok((db, product))
}

/// An unsaved catalog product titled "Test Party", for tests that need no database.
#[must_use]
pub fn product_model(id: i64) -> product::Model {
    let now = chrono::Utc::now().naive_utc();
    product::Model {
        id,
        product_id: None,
        origin_product_id: None,
        title: "Test Party".to_string(),
        price: 30000,
        count_dating: None,
        opened_at: None,
        place: None,
        address: None,
        place_name: None,
        age: None,
        max_women: None,
        max_men: None,
        must_do: None,
        category_id: None,
        sub_category_id: None,
        mood_id: None,
        usage_id: None,
        url: None,
        hide: false,
        for_order: false,
        count: None,
        color: None,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

/// Media store holding files in memory. URLs look like
/// `memory://{entity id}/{collection}/{file name}`.
#[derive(Debug, Default)]
pub struct MemoryMediaStore {
    files: HashMap<(i64, MediaCollection), Vec<StoredFile>>,
    next_id: i64,
}

impl MemoryMediaStore {
    /// Appends a file to a collection.
    pub fn insert(&mut self, entity_id: i64, collection: MediaCollection, file_name: &str) {
        self.next_id += 1;
        self.files
            .entry((entity_id, collection))
            .or_default()
            .push(StoredFile {
                id: self.next_id,
                file_name: file_name.to_string(),
                url: format!("memory://{entity_id}/{collection}/{file_name}"),
            });
    }
}

impl MediaStore for MemoryMediaStore {
    async fn get_single(
        &self,
        entity_id: i64,
        collection: MediaCollection,
    ) -> Result<Option<StoredFile>> {
        Ok(self
            .files
            .get(&(entity_id, collection))
            .and_then(|files| files.first().cloned()))
    }

    async fn get_list(&self, entity_id: i64, collection: MediaCollection) -> Result<Vec<StoredFile>> {
        Ok(self
            .files
            .get(&(entity_id, collection))
            .cloned()
            .unwrap_or_default())
    }
}
