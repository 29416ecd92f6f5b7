//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, retrieving, updating, and soft deleting
//! products. The products table is self-referential: options point at their parent and
//! order snapshots point at the row they were copied from. [`ProductKind`] makes that
//! distinction explicit, and relations are resolved through the lookup functions here
//! rather than lazily.

use crate::{
    config::CatalogConfig,
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Deserialize;
use tracing::info;

/// What role a product row plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductKind {
    /// A purchasable item shown in listings
    Catalog,
    /// A sub-choice attached to a catalog product
    Option {
        /// The catalog product this option belongs to
        parent_id: i64,
    },
    /// A copy made at checkout
    OrderSnapshot {
        /// The product this row was copied from
        origin_id: i64,
        /// The parent snapshot, for copies of options
        parent_id: Option<i64>,
    },
}

impl ProductKind {
    /// Classifies a product row.
    #[must_use]
    pub const fn of(product: &product::Model) -> Self {
        match (product.origin_product_id, product.product_id) {
            (Some(origin_id), parent_id) => Self::OrderSnapshot {
                origin_id,
                parent_id,
            },
            (None, Some(parent_id)) => Self::Option { parent_id },
            (None, None) => Self::Catalog,
        }
    }
}

/// Administrative input for creating or updating a product.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    /// Parent product; set to create an option
    pub parent_id: Option<i64>,
    /// Display title; surrounding whitespace is trimmed
    pub title: String,
    /// Unit price, never negative
    pub price: i64,
    /// Number of dating rounds
    pub count_dating: Option<i32>,
    /// When the party opens
    pub opened_at: Option<DateTimeUtc>,
    /// Venue area
    pub place: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Venue name
    pub place_name: Option<String>,
    /// Accepted age range
    pub age: Option<String>,
    /// Capacity for women
    pub max_women: Option<i32>,
    /// Capacity for men
    pub max_men: Option<i32>,
    /// Participant instructions
    pub must_do: Option<String>,
    /// Category
    pub category_id: Option<i64>,
    /// Sub-category
    pub sub_category_id: Option<i64>,
    /// Mood
    pub mood_id: Option<i64>,
    /// Usage
    pub usage_id: Option<i64>,
    /// External link
    pub url: Option<String>,
    /// Hidden from the public catalog
    pub hide: bool,
}

impl ProductInput {
    /// Input with just a title and price; everything else unset.
    #[must_use]
    pub fn new(title: impl Into<String>, price: i64) -> Self {
        Self {
            title: title.into(),
            price,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Config {
                message: "Product title cannot be empty".to_string(),
            });
        }

        if self.price < 0 {
            return Err(Error::InvalidPrice { price: self.price });
        }

        for capacity in [self.max_women, self.max_men, self.count_dating]
            .into_iter()
            .flatten()
        {
            if capacity < 0 {
                return Err(Error::InvalidCount {
                    count: i64::from(capacity),
                });
            }
        }

        Ok(())
    }

    fn apply(self, product: &mut product::ActiveModel) {
        product.title = Set(self.title.trim().to_string());
        product.price = Set(self.price);
        product.count_dating = Set(self.count_dating);
        product.opened_at = Set(self.opened_at);
        product.place = Set(self.place);
        product.address = Set(self.address);
        product.place_name = Set(self.place_name);
        product.age = Set(self.age);
        product.max_women = Set(self.max_women);
        product.max_men = Set(self.max_men);
        product.must_do = Set(self.must_do);
        product.category_id = Set(self.category_id);
        product.sub_category_id = Set(self.sub_category_id);
        product.mood_id = Set(self.mood_id);
        product.usage_id = Set(self.usage_id);
        product.url = Set(self.url);
        product.hide = Set(self.hide);
    }
}

/// Soft-delete behaviour for order copies of a deleted product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeletePolicy {
    /// Also soft-delete every row copied from the product at order time
    pub cascade_to_order_copies: bool,
}

impl From<CatalogConfig> for DeletePolicy {
    fn from(config: CatalogConfig) -> Self {
        Self {
            cascade_to_order_copies: config.cascade_delete_to_order_copies,
        }
    }
}

/// Retrieves a specific product by its unique ID, deleted or not.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Options of a product, in creation order. Deleted options and order copies are excluded.
pub async fn get_options<C>(db: &C, parent_id: i64) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::ProductId.eq(parent_id))
        .filter(product::Column::ForOrder.eq(false))
        .filter(product::Column::IsDeleted.eq(false))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one option of `parent_id` by id; `None` if it belongs elsewhere or is deleted.
pub async fn find_option<C>(db: &C, parent_id: i64, option_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(option_id)
        .filter(product::Column::ProductId.eq(parent_id))
        .filter(product::Column::ForOrder.eq(false))
        .filter(product::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Rows copied from `origin_id` at order time, oldest first.
pub async fn get_order_copies<C>(db: &C, origin_id: i64) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::OriginProductId.eq(origin_id))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The product an order snapshot was copied from; `None` for non-snapshots.
pub async fn get_origin<C>(db: &C, product: &product::Model) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    match ProductKind::of(product) {
        ProductKind::OrderSnapshot { origin_id, .. } => get_product_by_id(db, origin_id).await,
        ProductKind::Catalog | ProductKind::Option { .. } => Ok(None),
    }
}

/// Creates a catalog product, or an option when `input.parent_id` is set.
///
/// # Errors
/// Returns an error if:
/// - The title is empty or whitespace-only
/// - The price or a capacity is negative
/// - The parent does not exist, is deleted, or is not a catalog product
/// - The database insert operation fails
pub async fn create_product(db: &DatabaseConnection, input: ProductInput) -> Result<product::Model> {
    input.validate()?;

    if let Some(parent_id) = input.parent_id {
        let parent = get_product_by_id(db, parent_id)
            .await?
            .filter(|parent| !parent.is_deleted)
            .ok_or(Error::ProductNotFound { id: parent_id })?;
        if ProductKind::of(&parent) != ProductKind::Catalog {
            return Err(Error::Config {
                message: format!("Product {parent_id} cannot have options"),
            });
        }
    }

    let now = chrono::Utc::now().naive_utc();
    let mut product = product::ActiveModel {
        product_id: Set(input.parent_id),
        origin_product_id: Set(None),
        for_order: Set(false),
        count: Set(None),
        color: Set(None),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    input.apply(&mut product);

    let product = product.insert(db).await?;
    info!(product_id = product.id, kind = ?ProductKind::of(&product), "Created product");
    Ok(product)
}

/// Updates an existing product's fields. The parent link is not changed.
///
/// # Errors
/// Returns an error if:
/// - The input fails validation
/// - The product does not exist or is already deleted
/// - The product is an order snapshot
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    input: ProductInput,
) -> Result<product::Model> {
    input.validate()?;

    let existing = get_product_by_id(db, product_id)
        .await?
        .filter(|product| !product.is_deleted)
        .ok_or(Error::ProductNotFound { id: product_id })?;

    if let ProductKind::OrderSnapshot { .. } = ProductKind::of(&existing) {
        return Err(Error::SnapshotImmutable { id: product_id });
    }

    let mut product: product::ActiveModel = existing.into();
    input.apply(&mut product);
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    product.update(db).await.map_err(Into::into)
}

/// Soft deletes a product by marking it as deleted, preserving order history.
///
/// With [`DeletePolicy::cascade_to_order_copies`] every order copy of the product is
/// soft deleted in the same transaction.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist or is already deleted
/// - The database update operation fails
pub async fn delete_product(
    db: &DatabaseConnection,
    product_id: i64,
    policy: DeletePolicy,
) -> Result<product::Model> {
    let txn = db.begin().await?;

    let mut product: product::ActiveModel = get_product_by_id(&txn, product_id)
        .await?
        .filter(|product| !product.is_deleted)
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    let now = chrono::Utc::now().naive_utc();
    product.is_deleted = Set(true);
    product.updated_at = Set(now);
    let product = product.update(&txn).await?;

    if policy.cascade_to_order_copies {
        let copies = Product::update_many()
            .col_expr(product::Column::IsDeleted, Expr::value(true))
            .col_expr(product::Column::UpdatedAt, Expr::value(now))
            .filter(product::Column::OriginProductId.eq(product_id))
            .filter(product::Column::IsDeleted.eq(false))
            .exec(&txn)
            .await?;
        info!(
            product_id,
            copies = copies.rows_affected,
            "Soft deleted order copies"
        );
    }

    txn.commit().await?;
    info!(product_id, "Soft deleted product");
    Ok(product)
}
