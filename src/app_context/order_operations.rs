use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::{require_amount, require_text, AppContext, NewOrder, OrderSummary};
use crate::auth::{authorize, policy, Actor};
use crate::database::entities::orders::{self, OrderStatus};
use crate::database::entities::tables;
use crate::errors::{CoreError, CoreResult};

impl AppContext {
    /// Place an order against an existing table.
    ///
    /// New orders always start in `PREPARING`. `orderNumber` is not checked
    /// for uniqueness.
    pub async fn add_order_to_table(
        &self,
        actor: Option<&Actor>,
        input: NewOrder,
    ) -> CoreResult<OrderSummary> {
        authorize(actor, policy::ADD_ORDER_TO_TABLE)?;
        require_text("orderNumber", &input.order_number)?;
        require_text("userName", &input.user_name)?;
        require_text("userEmail", &input.user_email)?;
        require_amount("serviceFee", input.service_fee)?;
        require_amount("total", input.total)?;
        if let Some(discount) = input.discount {
            require_amount("discount", discount)?;
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::database("begin order transaction", e))?;

        let table = tables::Entity::find_by_id(input.table_id.clone())
            .one(&txn)
            .await
            .map_err(|e| CoreError::database("load table", e))?;
        if table.is_none() {
            // Dropping the transaction rolls it back
            return Err(CoreError::not_found("Table", input.table_id));
        }

        let order = orders::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            order_number: Set(input.order_number),
            cart: Set(input.cart),
            user_name: Set(input.user_name),
            user_email: Set(input.user_email),
            table_id: Set(input.table_id),
            status: Set(OrderStatus::Preparing.as_str().to_string()),
            service_fee: Set(input.service_fee),
            discount: Set(input.discount),
            total: Set(input.total),
            note: Set(input.note),
            payment_token: Set(input.payment_token),
            created_at: Set(Utc::now()),
        };

        let order = order
            .insert(&txn)
            .await
            .map_err(|e| CoreError::database("create order", e))?;

        txn.commit()
            .await
            .map_err(|e| CoreError::database("commit order transaction", e))?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            table_id = %order.table_id,
            "Created order"
        );
        Ok(OrderSummary::from(order))
    }

    pub async fn orders_for_table(
        &self,
        actor: Option<&Actor>,
        table_id: &str,
    ) -> CoreResult<Vec<OrderSummary>> {
        authorize(actor, policy::READ_ORDERS)?;

        let orders = orders::Entity::find()
            .filter(orders::Column::TableId.eq(table_id))
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::database("list orders", e))?;

        Ok(orders.into_iter().map(OrderSummary::from).collect())
    }
}
