//! Media store backed by the `media` table.
//!
//! URLs are resolved as `{base_url}/{media id}/{file name}`.

use super::{MediaCollection, MediaStore, StoredFile};
use crate::{
    entities::{Media, media},
    errors::Result,
};
use sea_orm::{Condition, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::debug;

/// Owner type recorded for product media.
pub const PRODUCT_MODEL_TYPE: &str = "products";

/// Media store reading product files from the database.
#[derive(Clone, Copy, Debug)]
pub struct DatabaseMediaStore<'a> {
    db: &'a DatabaseConnection,
    base_url: &'a str,
}

impl<'a> DatabaseMediaStore<'a> {
    /// Creates a store resolving URLs against `base_url`. Trailing slashes are ignored.
    #[must_use]
    pub fn new(db: &'a DatabaseConnection, base_url: &'a str) -> Self {
        Self {
            db,
            base_url: base_url.trim_end_matches('/'),
        }
    }

    fn resolve(&self, file: media::Model) -> StoredFile {
        StoredFile {
            url: format!("{}/{}/{}", self.base_url, file.id, file.file_name),
            id: file.id,
            file_name: file.file_name,
        }
    }

    async fn files(&self, entity_id: i64, collection: MediaCollection) -> Result<Vec<media::Model>> {
        Media::find()
            .filter(collection_scope(entity_id, collection))
            .order_by_asc(media::Column::OrderColumn)
            .order_by_asc(media::Column::Id)
            .all(self.db)
            .await
            .map_err(Into::into)
    }
}

impl MediaStore for DatabaseMediaStore<'_> {
    async fn get_single(
        &self,
        entity_id: i64,
        collection: MediaCollection,
    ) -> Result<Option<StoredFile>> {
        let files = self.files(entity_id, collection).await?;
        Ok(files.into_iter().next().map(|file| self.resolve(file)))
    }

    async fn get_list(&self, entity_id: i64, collection: MediaCollection) -> Result<Vec<StoredFile>> {
        let files = self.files(entity_id, collection).await?;
        Ok(files.into_iter().map(|file| self.resolve(file)).collect())
    }
}

/// Rows of one product's collection.
fn collection_scope(product_id: i64, collection: MediaCollection) -> Condition {
    Condition::all()
        .add(media::Column::ModelType.eq(PRODUCT_MODEL_TYPE))
        .add(media::Column::ModelId.eq(product_id))
        .add(media::Column::CollectionName.eq(collection.as_str()))
}

/// Attaches a file to a product's collection.
///
/// Files are appended after the existing ones. For single-file collections the
/// previous file is removed first, in the same transaction.
///
/// # Errors
/// Returns an error if a database operation fails; nothing is written in that case.
pub async fn add_media(
    db: &DatabaseConnection,
    product_id: i64,
    collection: MediaCollection,
    file_name: &str,
) -> Result<media::Model> {
    let txn = db.begin().await?;

    let scope = collection_scope(product_id, collection);

    let order_column = if collection.is_single_file() {
        let removed = Media::delete_many()
            .filter(scope)
            .exec(&txn)
            .await?;
        if removed.rows_affected > 0 {
            debug!("Replaced {} file(s) in {collection} of product {product_id}", removed.rows_affected);
        }
        1
    } else {
        Media::find()
            .filter(scope)
            .order_by_desc(media::Column::OrderColumn)
            .one(&txn)
            .await?
            .map_or(1, |last| last.order_column + 1)
    };

    let file = media::ActiveModel {
        model_type: Set(PRODUCT_MODEL_TYPE.to_string()),
        model_id: Set(product_id),
        collection_name: Set(collection.as_str().to_string()),
        file_name: Set(file_name.to_string()),
        order_column: Set(order_column),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_single_file_collection_replaces() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let store = DatabaseMediaStore::new(&db, "https://cdn.test/");

        add_media(&db, product.id, MediaCollection::Img, "first.jpg").await?;
        let second = add_media(&db, product.id, MediaCollection::Img, "second.jpg").await?;

        let files = store.get_list(product.id, MediaCollection::Img).await?;
        assert_eq!(files.len(), 1);

        let single = store.get_single(product.id, MediaCollection::Img).await?.unwrap();
        assert_eq!(single.file_name, "second.jpg");
        assert_eq!(single.url, format!("https://cdn.test/{}/second.jpg", second.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let store = DatabaseMediaStore::new(&db, "/storage");

        for name in ["c.jpg", "a.jpg", "b.jpg"] {
            add_media(&db, product.id, MediaCollection::ImgsParty, name).await?;
        }

        let names: Vec<String> = store
            .get_list(product.id, MediaCollection::ImgsParty)
            .await?
            .into_iter()
            .map(|f| f.file_name)
            .collect();
        assert_eq!(names, ["c.jpg", "a.jpg", "b.jpg"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_collections() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let store = DatabaseMediaStore::new(&db, "/storage");

        add_media(&db, product.id, MediaCollection::ImgsFood, "soup.jpg").await?;

        assert!(store.get_single(product.id, MediaCollection::Img).await?.is_none());
        assert!(store.get_list(product.id, MediaCollection::ImgsParty).await?.is_empty());
        // Other products never see this product's files
        assert!(store.get_list(product.id + 1, MediaCollection::ImgsFood).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_store_borrows_the_shared_connection() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let store = DatabaseMediaStore::new(&db, "/storage//");

        // Writes through the same connection are visible to the store
        let file = add_media(&db, product.id, MediaCollection::ImgShow, "stage.png").await?;
        let single = store.get_single(product.id, MediaCollection::ImgShow).await?.unwrap();
        assert_eq!(single.url, format!("/storage/{}/stage.png", file.id));

        Ok(())
    }
}
