//! External product projection - the stable JSON shape consumed by front ends.
//!
//! `img` here is a plain URL string and is `""` when no image is stored. It is not
//! the `{url, name}` pair used by [`crate::core::attributes::ProductView`].

use crate::{
    core::attributes::image,
    entities::product,
    errors::Result,
    media::{MediaCollection, MediaStore},
};
use serde::Serialize;

/// `{ id, title, img, hide, url }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExternalView {
    /// Product id
    pub id: i64,
    /// Product title
    pub title: String,
    /// Listing image URL, `""` when absent
    pub img: String,
    /// Hidden flag
    pub hide: bool,
    /// External link, `""` when absent
    pub url: String,
}

/// Projects `product` using the already-resolved listing image URL.
#[must_use]
pub fn to_external_view(product: &product::Model, img_url: Option<String>) -> ExternalView {
    ExternalView {
        id: product.id,
        title: product.title.clone(),
        img: img_url.unwrap_or_default(),
        hide: product.hide,
        url: product.url.clone().unwrap_or_default(),
    }
}

/// Projects `product`, looking its listing image up in `media`.
pub async fn external_view<M: MediaStore>(
    media: &M,
    product: &product::Model,
) -> Result<ExternalView> {
    let img = image(media, product.id, MediaCollection::Img).await?;
    Ok(to_external_view(product, img.map(|img| img.url)))
}
