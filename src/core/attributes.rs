//! Derived product attributes and the internal product view.
//!
//! Nothing here is stored on the product row. Each attribute is computed from the row,
//! the order association, or the media store, and [`project_product`] assembles them at
//! the serialization boundary. Every function returns its empty value (`false`, `0`,
//! `None`, empty list) for a product with no orders or no media.

use crate::{
    entities::{OrderProduct, OrderState, Sex, order, order_product, product, user},
    errors::Result,
    media::{MediaCollection, MediaStore, StoredFile},
};
use sea_orm::{JoinType, PaginatorTrait, QuerySelect, prelude::*};
use serde::Serialize;

/// A resolved image: public URL plus original file name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// Public URL
    pub url: String,
    /// Original file name
    pub name: String,
}

impl From<StoredFile> for ImageRef {
    fn from(file: StoredFile) -> Self {
        Self {
            url: file.url,
            name: file.file_name,
        }
    }
}

/// True iff the product opens strictly after `now`. Products without an opening
/// time are never ongoing.
#[must_use]
pub fn is_ongoing(product: &product::Model, now: DateTimeUtc) -> bool {
    product.opened_at.is_some_and(|opened_at| opened_at > now)
}

/// Counts distinct successful orders of users of `sex` that accepted this product.
pub async fn accept_count<C>(db: &C, product_id: i64, sex: Sex) -> Result<u64>
where
    C: ConnectionTrait,
{
    OrderProduct::find()
        .select_only()
        .column(order_product::Column::OrderId)
        .distinct()
        .join(JoinType::InnerJoin, order_product::Relation::Order.def())
        .join(JoinType::InnerJoin, order::Relation::User.def())
        .filter(order_product::Column::ProductId.eq(product_id))
        .filter(order_product::Column::Accept.eq(true))
        .filter(order::Column::State.eq(OrderState::Success))
        .filter(user::Column::Sex.eq(sex))
        .count(db)
        .await
        .map_err(Into::into)
}

/// The single image of a collection, if one is stored.
pub async fn image<M: MediaStore>(
    media: &M,
    product_id: i64,
    collection: MediaCollection,
) -> Result<Option<ImageRef>> {
    Ok(media
        .get_single(product_id, collection)
        .await?
        .map(ImageRef::from))
}

/// All images of a collection, in storage order.
pub async fn image_list<M: MediaStore>(
    media: &M,
    product_id: i64,
    collection: MediaCollection,
) -> Result<Vec<ImageRef>> {
    Ok(media
        .get_list(product_id, collection)
        .await?
        .into_iter()
        .map(ImageRef::from)
        .collect())
}

/// A product together with its derived attributes, as served to API clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductView {
    /// The stored row
    #[serde(flatten)]
    pub product: product::Model,
    /// Main listing image
    pub img: Option<ImageRef>,
    /// Detail page image
    pub img_show: Option<ImageRef>,
    /// Photos from past parties
    pub imgs_party: Vec<ImageRef>,
    /// Photos of the food
    pub imgs_food: Vec<ImageRef>,
    /// Successful orders accepted by women
    pub accept_women: u64,
    /// Successful orders accepted by men
    pub accept_men: u64,
    /// Whether the party has not opened yet
    pub ongoing: bool,
}

/// Builds the view of `product`, evaluating `ongoing` against `now`.
pub async fn project_product<C, M>(
    db: &C,
    media: &M,
    product: product::Model,
    now: DateTimeUtc,
) -> Result<ProductView>
where
    C: ConnectionTrait,
    M: MediaStore,
{
    let id = product.id;
    Ok(ProductView {
        img: image(media, id, MediaCollection::Img).await?,
        img_show: image(media, id, MediaCollection::ImgShow).await?,
        imgs_party: image_list(media, id, MediaCollection::ImgsParty).await?,
        imgs_food: image_list(media, id, MediaCollection::ImgsFood).await?,
        accept_women: accept_count(db, id, Sex::Women).await?,
        accept_men: accept_count(db, id, Sex::Men).await?,
        ongoing: is_ongoing(&product, now),
        product,
    })
}
