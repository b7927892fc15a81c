use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A physical table on the restaurant floor.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub table_number: i32,
    pub diners: i32,
    #[sea_orm(column_type = "Json", nullable)]
    pub position: Option<Json>, // {x: f64, y: f64}
    pub area_id: String,
    pub reserved: bool,
    #[sea_orm(column_type = "Json")]
    pub special_requests: Json, // ["window seat", ...]
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::areas::Entity",
        from = "Column::AreaId",
        to = "super::areas::Column::Id"
    )]
    Areas,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::areas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Areas.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn special_requests_parsed(&self) -> Vec<String> {
        serde_json::from_value(self.special_requests.clone()).unwrap_or_default()
    }
}
