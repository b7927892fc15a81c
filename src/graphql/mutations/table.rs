use async_graphql::*;

use crate::auth::{authorize, policy};
use crate::graphql::context::{request_actor, GraphQLContext};
use crate::graphql::errors::core_error_to_graphql_error;
use crate::graphql::types::{AddTableInput, EditTableInput, Position, Table};

#[derive(Default)]
pub struct TableMutation;

#[Object]
impl TableMutation {
    /// Create a table; the table number must be unused
    async fn add_table(&self, ctx: &Context<'_>, input: AddTableInput) -> Result<Table> {
        let context = ctx.data::<GraphQLContext>()?;
        let table = context
            .app
            .add_table(request_actor(ctx), input.into())
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(Table::from(table))
    }

    /// Update only the provided fields of a table
    async fn edit_table(&self, ctx: &Context<'_>, id: ID, input: EditTableInput) -> Result<Table> {
        let context = ctx.data::<GraphQLContext>()?;
        let actor = request_actor(ctx);
        // Role check precedes input validation
        authorize(actor, policy::EDIT_TABLE).map_err(core_error_to_graphql_error)?;
        let update = input.into_update()?;
        let table = context
            .app
            .edit_table(actor, id.as_str(), update)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(Table::from(table))
    }

    /// Delete a table
    async fn delete_table(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .app
            .delete_table(request_actor(ctx), id.as_str())
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(true)
    }

    async fn toggle_table_reservation(
        &self,
        ctx: &Context<'_>,
        id: ID,
        reserved: bool,
    ) -> Result<Table> {
        let context = ctx.data::<GraphQLContext>()?;
        let table = context
            .app
            .toggle_table_reservation(request_actor(ctx), id.as_str(), reserved)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(Table::from(table))
    }

    /// Move a table on the floor plan, addressed by its number
    async fn move_position_table(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "tableNumber")] table_number: i32,
        position: Position,
    ) -> Result<Table> {
        let context = ctx.data::<GraphQLContext>()?;
        let table = context
            .app
            .move_position_table(request_actor(ctx), table_number, position.into())
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(Table::from(table))
    }
}
