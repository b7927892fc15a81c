use async_graphql::*;

use crate::graphql::context::{request_actor, GraphQLContext};
use crate::graphql::errors::core_error_to_graphql_error;
use crate::graphql::types::Area;

#[derive(Default)]
pub struct AreaMutation;

#[Object]
impl AreaMutation {
    /// Create a floor area
    async fn add_area(&self, ctx: &Context<'_>, name: String) -> Result<Area> {
        let context = ctx.data::<GraphQLContext>()?;
        let area = context
            .app
            .add_area(request_actor(ctx), name)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(Area::from(area))
    }
}
