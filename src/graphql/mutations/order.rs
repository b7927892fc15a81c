use async_graphql::*;

use crate::graphql::context::{request_actor, GraphQLContext};
use crate::graphql::errors::core_error_to_graphql_error;
use crate::graphql::types::{AddOrderInput, Order};

#[derive(Default)]
pub struct OrderMutation;

#[Object]
impl OrderMutation {
    /// Place an order on a table. The order starts as PREPARING.
    async fn add_order_to_table(&self, ctx: &Context<'_>, input: AddOrderInput) -> Result<Order> {
        let context = ctx.data::<GraphQLContext>()?;
        let order = context
            .app
            .add_order_to_table(request_actor(ctx), input.into())
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(Order::from(order))
    }
}
