use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::errors::CoreError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub role: String, // USER, ADMIN, DELIVERY, WAITER, CHEF, MANAGER
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_sessions::Entity")]
    UserSessions,
}

impl Related<super::user_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(email: String, name: String, role: Role) -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(email),
            name: Set(name),
            role: Set(role.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
        }
    }
}

impl Model {
    pub fn role(&self) -> Result<Role, CoreError> {
        self.role.parse()
    }
}
