//! Media collaborator - named file collections attached to products.
//!
//! The catalog never talks to a storage backend directly. It asks a [`MediaStore`]
//! for the files of a collection, and the store resolves each file to a URL.

/// `SeaORM`-backed media store
pub mod database;

pub use database::DatabaseMediaStore;

use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// The media collections registered for products.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCollection {
    /// Main listing image
    Img,
    /// Image shown on the detail page
    ImgShow,
    /// Photos from past parties
    ImgsParty,
    /// Photos of the food served
    ImgsFood,
}

impl MediaCollection {
    /// Every registered collection, in registration order.
    pub const ALL: [Self; 4] = [Self::Img, Self::ImgShow, Self::ImgsParty, Self::ImgsFood];

    /// Collection name as stored in the `media` table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Img => "img",
            Self::ImgShow => "img_show",
            Self::ImgsParty => "imgs_party",
            Self::ImgsFood => "imgs_food",
        }
    }

    /// Single-file collections hold at most one file; adding replaces it.
    #[must_use]
    pub const fn is_single_file(self) -> bool {
        matches!(self, Self::Img | Self::ImgShow)
    }
}

impl std::fmt::Display for MediaCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored file resolved to a public URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredFile {
    /// Store-assigned identifier
    pub id: i64,
    /// Original file name
    pub file_name: String,
    /// Public URL
    pub url: String,
}

/// Media lookups used by the catalog projections.
///
/// `entity_id` is the id of the owning product.
pub trait MediaStore {
    /// First file of `collection`, or `None` when the collection is empty.
    fn get_single(
        &self,
        entity_id: i64,
        collection: MediaCollection,
    ) -> impl Future<Output = Result<Option<StoredFile>>> + Send;

    /// All files of `collection` in storage order; empty when there are none.
    fn get_list(
        &self,
        entity_id: i64,
        collection: MediaCollection,
    ) -> impl Future<Output = Result<Vec<StoredFile>>> + Send;
}
