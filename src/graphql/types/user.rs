use async_graphql::*;

use crate::auth::Role;

#[derive(SimpleObject)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub role: Role,
}
