use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::app_context::{NewTable, TableSummary, TableUpdate};
use crate::graphql::context::{request_actor, GraphQLContext};
use crate::graphql::errors::{core_error_to_graphql_error, validation_error};
use crate::graphql::types::{Order, Position};

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Table {
    pub id: ID,
    #[graphql(name = "tableNumber")]
    pub table_number: i32,
    pub diners: i32,
    pub position: Option<Position>,
    #[graphql(name = "areaId")]
    pub area_id: ID,
    pub reserved: bool,
    #[graphql(name = "specialRequests")]
    pub special_requests: Vec<String>,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[graphql(name = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<TableSummary> for Table {
    fn from(summary: TableSummary) -> Self {
        Self {
            id: ID::from(summary.id),
            table_number: summary.table_number,
            diners: summary.diners,
            position: summary.position.map(Position::from),
            area_id: ID::from(summary.area_id),
            reserved: summary.reserved,
            special_requests: summary.special_requests,
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

#[ComplexObject]
impl Table {
    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let context = ctx.data::<GraphQLContext>()?;
        let orders = context
            .app
            .orders_for_table(request_actor(ctx), self.id.as_str())
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(orders.into_iter().map(Order::from).collect())
    }
}

#[derive(InputObject)]
pub struct AddTableInput {
    #[graphql(name = "tableNumber")]
    pub table_number: i32,
    pub diners: i32,
    pub position: Option<Position>,
    #[graphql(name = "areaId")]
    pub area_id: ID,
    pub reserved: Option<bool>,
    #[graphql(name = "specialRequests")]
    pub special_requests: Option<Vec<String>>,
}

impl From<AddTableInput> for NewTable {
    fn from(input: AddTableInput) -> Self {
        Self {
            table_number: input.table_number,
            diners: input.diners,
            position: input.position.map(Into::into),
            area_id: input.area_id.0,
            reserved: input.reserved.unwrap_or(false),
            special_requests: input.special_requests.unwrap_or_default(),
        }
    }
}

/// Every field may be omitted. Only `position` may be explicitly null,
/// which clears it.
#[derive(InputObject, Default)]
pub struct EditTableInput {
    #[graphql(name = "tableNumber")]
    pub table_number: MaybeUndefined<i32>,
    pub diners: MaybeUndefined<i32>,
    pub position: MaybeUndefined<Position>,
    #[graphql(name = "areaId")]
    pub area_id: MaybeUndefined<ID>,
    pub reserved: MaybeUndefined<bool>,
    #[graphql(name = "specialRequests")]
    pub special_requests: MaybeUndefined<Vec<String>>,
}

impl EditTableInput {
    pub fn into_update(self) -> Result<TableUpdate> {
        Ok(TableUpdate {
            table_number: not_nullable("tableNumber", self.table_number)?,
            diners: not_nullable("diners", self.diners)?,
            position: match self.position {
                MaybeUndefined::Undefined => None,
                MaybeUndefined::Null => Some(None),
                MaybeUndefined::Value(position) => Some(Some(position.into())),
            },
            area_id: not_nullable("areaId", self.area_id)?.map(|id| id.0),
            reserved: not_nullable("reserved", self.reserved)?,
            special_requests: not_nullable("specialRequests", self.special_requests)?,
        })
    }
}

fn not_nullable<T>(field: &str, value: MaybeUndefined<T>) -> Result<Option<T>> {
    match value {
        MaybeUndefined::Undefined => Ok(None),
        MaybeUndefined::Null => Err(validation_error(field, "cannot be null")),
        MaybeUndefined::Value(value) => Ok(Some(value)),
    }
}
