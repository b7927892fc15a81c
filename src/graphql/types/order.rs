use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::app_context::{NewOrder, OrderSummary};
use crate::database::entities::orders::OrderStatus;

#[derive(SimpleObject)]
pub struct Order {
    pub id: ID,
    #[graphql(name = "orderNumber")]
    pub order_number: String,
    pub cart: Json<serde_json::Value>,
    #[graphql(name = "userName")]
    pub user_name: String,
    #[graphql(name = "userEmail")]
    pub user_email: String,
    #[graphql(name = "tableId")]
    pub table_id: ID,
    pub status: OrderStatus,
    #[graphql(name = "serviceFee")]
    pub service_fee: f64,
    pub discount: Option<f64>,
    pub total: f64,
    pub note: Option<String>,
    #[graphql(name = "paymentToken")]
    pub payment_token: Option<String>,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<OrderSummary> for Order {
    fn from(summary: OrderSummary) -> Self {
        Self {
            id: ID::from(summary.id),
            order_number: summary.order_number,
            cart: Json(summary.cart),
            user_name: summary.user_name,
            user_email: summary.user_email,
            table_id: ID::from(summary.table_id),
            status: summary.status,
            service_fee: summary.service_fee,
            discount: summary.discount,
            total: summary.total,
            note: summary.note,
            payment_token: summary.payment_token,
            created_at: summary.created_at,
        }
    }
}

#[derive(InputObject)]
pub struct AddOrderInput {
    #[graphql(name = "tableId")]
    pub table_id: ID,
    #[graphql(name = "orderNumber")]
    pub order_number: String,
    /// List of `{item, quantity}` entries, stored as given
    pub cart: Json<serde_json::Value>,
    #[graphql(name = "userName")]
    pub user_name: String,
    #[graphql(name = "userEmail")]
    pub user_email: String,
    #[graphql(name = "serviceFee")]
    pub service_fee: f64,
    pub total: f64,
    pub discount: Option<f64>,
    pub note: Option<String>,
    #[graphql(name = "paymentToken")]
    pub payment_token: Option<String>,
}

impl From<AddOrderInput> for NewOrder {
    fn from(input: AddOrderInput) -> Self {
        Self {
            table_id: input.table_id.0,
            order_number: input.order_number,
            cart: input.cart.0,
            user_name: input.user_name,
            user_email: input.user_email,
            service_fee: input.service_fee,
            total: input.total,
            discount: input.discount,
            note: input.note,
            payment_token: input.payment_token,
        }
    }
}
