use async_graphql::*;

use crate::graphql::context::{request_actor, GraphQLContext};
use crate::graphql::errors::core_error_to_graphql_error;
use crate::graphql::types::{Area, Order, Table, User};

pub struct Query;

#[Object]
impl Query {
    /// The signed-in user, or null for anonymous requests
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let Some(actor) = request_actor(ctx) else {
            return Ok(None);
        };

        let user = context.sessions.user_for_actor(actor).await?;
        Ok(user.map(|user| User {
            id: ID::from(user.id),
            email: user.email,
            name: user.name,
            role: actor.role,
        }))
    }

    /// All floor areas
    async fn areas(&self, ctx: &Context<'_>) -> Result<Vec<Area>> {
        let context = ctx.data::<GraphQLContext>()?;
        let areas = context
            .app
            .list_areas(request_actor(ctx))
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(areas.into_iter().map(Area::from).collect())
    }

    /// Tables ordered by number, optionally limited to one area
    async fn tables(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "areaId")] area_id: Option<ID>,
    ) -> Result<Vec<Table>> {
        let context = ctx.data::<GraphQLContext>()?;
        let tables = context
            .app
            .list_tables(request_actor(ctx), area_id.as_deref().map(String::as_str))
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(tables.into_iter().map(Table::from).collect())
    }

    async fn table(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Table>> {
        let context = ctx.data::<GraphQLContext>()?;
        let table = context
            .app
            .get_table(request_actor(ctx), id.as_str())
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(table.map(Table::from))
    }

    /// Orders placed on a table, newest first
    async fn orders_for_table(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "tableId")] table_id: ID,
    ) -> Result<Vec<Order>> {
        let context = ctx.data::<GraphQLContext>()?;
        let orders = context
            .app
            .orders_for_table(request_actor(ctx), table_id.as_str())
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(orders.into_iter().map(Order::from).collect())
    }
}
