//! Order snapshots - immutable copies of products taken at checkout.
//!
//! A snapshot freezes the product as it was when the order was placed, so later
//! catalog edits never change what a customer bought. Options chosen with the order
//! are copied too and hang off the parent snapshot through `product_id`.

use crate::{
    core::product::find_option,
    entities::product,
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{debug, info};

/// One requested option. Fields are optional so loosely-typed input can be
/// deserialized and incomplete entries skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OptionSelection {
    /// Option product to copy
    pub id: Option<i64>,
    /// Quantity ordered; non-positive counts are skipped
    pub count: Option<i64>,
}

impl OptionSelection {
    /// A complete selection of `count` units of option `id`.
    #[must_use]
    pub const fn new(id: i64, count: i64) -> Self {
        Self {
            id: Some(id),
            count: Some(count),
        }
    }
}

/// A persisted order snapshot and the option snapshots created with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSnapshot {
    /// Copy of the ordered product
    pub product: product::Model,
    /// Copies of the selected options, in selection order
    pub options: Vec<product::Model>,
}

fn snapshot_of(
    source: &product::Model,
    parent_id: Option<i64>,
    count: i64,
    color: Option<String>,
    now: DateTime,
) -> product::ActiveModel {
    product::ActiveModel {
        product_id: Set(parent_id),
        origin_product_id: Set(Some(source.id)),
        title: Set(source.title.clone()),
        price: Set(source.price),
        count_dating: Set(source.count_dating),
        opened_at: Set(source.opened_at),
        place: Set(source.place.clone()),
        address: Set(source.address.clone()),
        place_name: Set(source.place_name.clone()),
        age: Set(source.age.clone()),
        max_women: Set(source.max_women),
        max_men: Set(source.max_men),
        must_do: Set(source.must_do.clone()),
        category_id: Set(source.category_id),
        sub_category_id: Set(source.sub_category_id),
        mood_id: Set(source.mood_id),
        usage_id: Set(source.usage_id),
        url: Set(source.url.clone()),
        hide: Set(source.hide),
        for_order: Set(true),
        count: Set(Some(count)),
        color: Set(color),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

/// Copies `source` into a new order snapshot, together with the requested options.
///
/// Each selection whose `id` names a live option of `source` and whose `count` is
/// positive produces one option snapshot. Other selections are skipped. Media is not
/// copied.
///
/// All rows are written in one transaction: if any insert fails nothing is kept.
///
/// # Errors
/// Returns an error if:
/// - `count` is less than 1 (`Error::InvalidCount`); nothing is written
/// - A snapshot row cannot be inserted (`Error::SnapshotFailed`)
/// - The transaction cannot be started or committed
pub async fn create_order_snapshot(
    db: &DatabaseConnection,
    source: &product::Model,
    count: i64,
    options: &[OptionSelection],
    color: Option<&str>,
) -> Result<OrderSnapshot> {
    if count < 1 {
        return Err(Error::InvalidCount { count });
    }

    let now = chrono::Utc::now().naive_utc();
    let txn = db.begin().await?;

    let snapshot = snapshot_of(
        source,
        source.product_id,
        count,
        color.map(ToString::to_string),
        now,
    )
    .insert(&txn)
    .await
    .map_err(|source_err| Error::SnapshotFailed {
        product_id: source.id,
        source: source_err,
    })?;

    let mut option_snapshots = Vec::new();
    for selection in options {
        let (Some(option_id), Some(option_count)) = (selection.id, selection.count) else {
            debug!(?selection, "Skipping incomplete option selection");
            continue;
        };
        if option_count <= 0 {
            debug!(option_id, option_count, "Skipping option with no quantity");
            continue;
        }
        let Some(option) = find_option(&txn, source.id, option_id).await? else {
            debug!(option_id, product_id = source.id, "Skipping unknown option");
            continue;
        };

        let option_snapshot = snapshot_of(
            &option,
            Some(snapshot.id),
            option_count,
            option.color.clone(),
            now,
        )
        .insert(&txn)
        .await
        .map_err(|source_err| Error::SnapshotFailed {
            product_id: option.id,
            source: source_err,
        })?;
        option_snapshots.push(option_snapshot);
    }

    txn.commit().await?;

    info!(
        product_id = source.id,
        snapshot_id = snapshot.id,
        options = option_snapshots.len(),
        "Created order snapshot"
    );

    Ok(OrderSnapshot {
        product: snapshot,
        options: option_snapshots,
    })
}
