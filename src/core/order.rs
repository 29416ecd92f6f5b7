//! Order association logic - links products to orders through the pivot table.
//!
//! Payment and checkout flows live elsewhere; this module only records which
//! products an order holds and the per-participant pivot attributes the catalog
//! reads back (acceptance, partner, state).

use crate::{
    entities::{Order, OrderProduct, OrderState, order, order_product},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*, sea_query::Expr};
use tracing::info;

/// Pivot attributes recorded when a product is attached to an order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachProduct {
    /// Participant the row is recorded for
    pub user_id: i64,
    /// Pivot-level state
    pub state: OrderState,
    /// Whether the participant accepted
    pub accept: bool,
    /// Free-form partner attribute
    pub partner: Option<String>,
}

/// Creates an order for `user_id` in the given state.
///
/// # Errors
/// Returns an error if the database insert operation fails, e.g. the user does not
/// exist.
pub async fn create_order(
    db: &DatabaseConnection,
    user_id: i64,
    state: OrderState,
) -> Result<order::Model> {
    let order = order::ActiveModel {
        user_id: Set(user_id),
        state: Set(state),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(order_id = order.id, user_id, ?state, "Created order");
    Ok(order)
}

/// Moves an order to a new lifecycle state.
///
/// # Errors
/// Returns an error if:
/// - The order does not exist (`Error::OrderNotFound`)
/// - The database update operation fails
pub async fn set_order_state(
    db: &DatabaseConnection,
    order_id: i64,
    state: OrderState,
) -> Result<order::Model> {
    let mut order: order::ActiveModel = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?
        .into();

    order.state = Set(state);
    order.update(db).await.map_err(Into::into)
}

/// Links a product to an order with the given pivot attributes.
///
/// # Errors
/// Returns an error if:
/// - The order does not exist (`Error::OrderNotFound`)
/// - The database insert operation fails
pub async fn attach_product(
    db: &DatabaseConnection,
    order_id: i64,
    product_id: i64,
    attach: AttachProduct,
) -> Result<order_product::Model> {
    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    order_product::ActiveModel {
        order_id: Set(order_id),
        product_id: Set(product_id),
        user_id: Set(attach.user_id),
        state: Set(attach.state),
        accept: Set(attach.accept),
        partner: Set(attach.partner),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Records whether the participant accepted, on every pivot row linking the pair.
///
/// Returns the number of pivot rows updated; 0 when the pair is not linked.
///
/// # Errors
/// Returns an error if the database update operation fails.
pub async fn set_acceptance(
    db: &DatabaseConnection,
    order_id: i64,
    product_id: i64,
    accept: bool,
) -> Result<u64> {
    let result = OrderProduct::update_many()
        .col_expr(order_product::Column::Accept, Expr::value(accept))
        .filter(order_product::Column::OrderId.eq(order_id))
        .filter(order_product::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Pivot rows of an order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_order_products(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_product::Model>> {
    OrderProduct::find()
        .filter(order_product::Column::OrderId.eq(order_id))
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::Sex;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_attach_and_accept() -> Result<()> {
        let (db, product) = setup_with_product().await?;
        let user = create_test_user(&db, "jiwoo", Sex::Women).await?;
        let order = create_order(&db, user.id, OrderState::Pending).await?;

        let attach = AttachProduct {
            user_id: user.id,
            state: OrderState::Pending,
            accept: false,
            partner: Some("friend".to_string()),
        };
        let pivot = attach_product(&db, order.id, product.id, attach).await?;
        assert!(!pivot.accept);
        assert_eq!(pivot.partner.as_deref(), Some("friend"));

        let updated = set_acceptance(&db, order.id, product.id, true).await?;
        assert_eq!(updated, 1);

        let pivots = get_order_products(&db, order.id).await?;
        assert_eq!(pivots.len(), 1);
        assert!(pivots[0].accept);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_order_state() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "minho", Sex::Men).await?;
        let order = create_order(&db, user.id, OrderState::Pending).await?;

        let order = set_order_state(&db, order.id, OrderState::Success).await?;
        assert_eq!(order.state, OrderState::Success);

        let result = set_order_state(&db, 999, OrderState::Success).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_attach_to_missing_order() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let attach = AttachProduct {
            user_id: 1,
            state: OrderState::Pending,
            accept: false,
            partner: None,
        };
        let result = attach_product(&db, 42, product.id, attach).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 42 }));

        Ok(())
    }
}
