//! Catalog filtering - turns search parameters into a composable product query.
//!
//! The filter never executes anything: [`CatalogFilter::query`] returns a `Select`
//! that the caller can order, paginate, and run.

use crate::{
    entities::{Product, product},
    errors::Result,
};
use sea_orm::{
    QueryOrder, Select,
    prelude::*,
    sea_query::{Func, LikeExpr},
};
use serde::Deserialize;
use tracing::debug;

const LIKE_ESCAPE: char = '\\';

/// Search parameters for the public catalog. Absent fields do not restrict.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the title
    pub word: Option<String>,
    /// Exact category
    pub category_id: Option<i64>,
    /// Exact sub-category
    pub sub_category_id: Option<i64>,
    /// Exact mood
    pub mood_id: Option<i64>,
    /// Exact usage
    pub usage_id: Option<i64>,
}

impl CatalogFilter {
    /// Builds a filter from loosely-typed `key=value` parameters, such as a query
    /// string. Unknown keys and values that do not parse are ignored.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = Self::default();
        for (key, value) in params {
            let slot = match key {
                "word" => {
                    filter.word = Some(value.to_string());
                    continue;
                }
                "category_id" => &mut filter.category_id,
                "sub_category_id" => &mut filter.sub_category_id,
                "mood_id" => &mut filter.mood_id,
                "usage_id" => &mut filter.usage_id,
                _ => {
                    debug!(key, "Ignoring unknown catalog filter key");
                    continue;
                }
            };
            match value.trim().parse() {
                Ok(id) => *slot = Some(id),
                Err(_) => debug!(key, value, "Ignoring malformed catalog filter value"),
            }
        }
        filter
    }

    /// The catalog query for this filter.
    ///
    /// Always restricted to visible, non-deleted catalog products: `hide = false`,
    /// `for_order = false`, `product_id IS NULL`.
    #[must_use]
    pub fn query(&self) -> Select<Product> {
        let mut query = Product::find()
            .filter(product::Column::Hide.eq(false))
            .filter(product::Column::ForOrder.eq(false))
            .filter(product::Column::ProductId.is_null())
            .filter(product::Column::IsDeleted.eq(false));

        // SQLite's LOWER() folds ASCII only; fold the word the same way
        if let Some(word) = self.word.as_deref().filter(|word| !word.is_empty()) {
            let pattern = format!("%{}%", escape_like(&word.to_ascii_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((Product, product::Column::Title))))
                    .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            );
        }

        let exact = [
            (product::Column::CategoryId, self.category_id),
            (product::Column::SubCategoryId, self.sub_category_id),
            (product::Column::MoodId, self.mood_id),
            (product::Column::UsageId, self.usage_id),
        ];
        for (column, value) in exact {
            if let Some(value) = value {
                query = query.filter(column.eq(value));
            }
        }

        query
    }
}

fn escape_like(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len());
    for c in word.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Runs `filter` and returns matching catalog products, newest first.
pub async fn list_catalog<C>(db: &C, filter: &CatalogFilter) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    filter
        .query()
        .order_by_desc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
