use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::app_context::AreaSummary;

#[derive(SimpleObject)]
pub struct Area {
    pub id: ID,
    pub name: String,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<AreaSummary> for Area {
    fn from(summary: AreaSummary) -> Self {
        Self {
            id: ID::from(summary.id),
            name: summary.name,
            created_at: summary.created_at,
        }
    }
}
