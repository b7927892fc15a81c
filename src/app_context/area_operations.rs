use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::info;

use super::{require_text, AppContext, AreaSummary};
use crate::auth::{authorize, policy, Actor};
use crate::database::entities::areas;
use crate::errors::{CoreError, CoreResult};

impl AppContext {
    pub async fn list_areas(&self, actor: Option<&Actor>) -> CoreResult<Vec<AreaSummary>> {
        authorize(actor, policy::READ_FLOOR)?;

        let areas = areas::Entity::find()
            .order_by_asc(areas::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::database("list areas", e))?;

        Ok(areas.into_iter().map(AreaSummary::from).collect())
    }

    pub async fn add_area(&self, actor: Option<&Actor>, name: String) -> CoreResult<AreaSummary> {
        authorize(actor, policy::ADD_AREA)?;
        require_text("name", &name)?;

        let area = areas::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.trim().to_string()),
            created_at: Set(Utc::now()),
        };

        let area = area
            .insert(&self.db)
            .await
            .map_err(|e| CoreError::database("create area", e))?;

        info!(area_id = %area.id, name = %area.name, "Created area");
        Ok(AreaSummary::from(area))
    }
}
