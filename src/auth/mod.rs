use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Permission level of a user. Stored upper-case in `users.role`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
    Delivery,
    Waiter,
    Chef,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Delivery => "DELIVERY",
            Role::Waiter => "WAITER",
            Role::Chef => "CHEF",
            Role::Manager => "MANAGER",
        }
    }

    pub fn all() -> [Role; 6] {
        [
            Role::User,
            Role::Admin,
            Role::Delivery,
            Role::Waiter,
            Role::Chef,
            Role::Manager,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            "DELIVERY" => Ok(Role::Delivery),
            "WAITER" => Ok(Role::Waiter),
            "CHEF" => Ok(Role::Chef),
            "MANAGER" => Ok(Role::Manager),
            _ => Err(CoreError::validation(format!("Invalid role: {}", s))),
        }
    }
}

/// The authenticated caller of an operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

/// Role sets required by each operation.
pub mod policy {
    use super::Role;

    pub const ADD_TABLE: &[Role] = &[Role::Admin, Role::Manager];
    pub const EDIT_TABLE: &[Role] = &[Role::Admin];
    pub const DELETE_TABLE: &[Role] = &[Role::Admin];
    pub const TOGGLE_TABLE_RESERVATION: &[Role] = &[Role::Admin];
    pub const ADD_ORDER_TO_TABLE: &[Role] = &[Role::Admin, Role::Manager, Role::Waiter];
    pub const MOVE_POSITION_TABLE: &[Role] = &[Role::Admin, Role::Manager];

    pub const ADD_AREA: &[Role] = &[Role::Admin];
    pub const READ_FLOOR: &[Role] = &[
        Role::User,
        Role::Admin,
        Role::Delivery,
        Role::Waiter,
        Role::Chef,
        Role::Manager,
    ];
    pub const READ_ORDERS: &[Role] = &[Role::Admin, Role::Manager, Role::Waiter, Role::Chef];
}

/// Check that an actor is present and holds one of `allowed`.
pub fn authorize(actor: Option<&Actor>, allowed: &[Role]) -> Result<(), CoreError> {
    let actor = actor.ok_or_else(|| CoreError::unauthenticated("Authentication required"))?;

    if actor.has_any_role(allowed) {
        return Ok(());
    }

    Err(CoreError::forbidden(format!(
        "Role {} is not permitted to perform this operation",
        actor.role
    )))
}
