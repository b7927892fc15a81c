use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::debug;

use crate::auth::{Actor, Role};
use crate::database::entities::{user_sessions, users};
use crate::errors::{AuthError, AuthResult};

const SESSION_TTL_HOURS: i64 = 24 * 30;

/// Resolves bearer tokens to actors and issues tokens for staff accounts.
#[derive(Clone, Debug)]
pub struct SessionService {
    db: DatabaseConnection,
}

impl SessionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Extract the token from an `Authorization` header value.
    pub fn parse_bearer(header: &str) -> AuthResult<&str> {
        let (scheme, token) = header
            .trim()
            .split_once(' ')
            .ok_or(AuthError::MalformedHeader)?;

        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AuthError::MalformedHeader);
        }
        Ok(token)
    }

    pub async fn actor_for_token(&self, token: &str) -> AuthResult<Actor> {
        let session = user_sessions::Entity::find()
            .filter(user_sessions::Column::Token.eq(token))
            .one(&self.db)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired() {
            return Err(AuthError::SessionExpired);
        }

        let user = users::Entity::find_by_id(session.user_id.clone())
            .one(&self.db)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let role = user
            .role()
            .map_err(|_| AuthError::InvalidRole(user.role.clone()))?;

        debug!(user_id = %user.id, role = %role, "Resolved session");
        Ok(Actor::new(user.id, role))
    }

    /// Load a user for display; `None` when the actor's row is gone.
    pub async fn user_for_actor(&self, actor: &Actor) -> AuthResult<Option<users::Model>> {
        Ok(users::Entity::find_by_id(actor.user_id.clone())
            .one(&self.db)
            .await?)
    }

    pub async fn create_user(&self, email: String, name: String, role: Role) -> AuthResult<users::Model> {
        Ok(users::ActiveModel::new(email, name, role)
            .insert(&self.db)
            .await?)
    }

    pub async fn issue_session(&self, user_id: &str) -> AuthResult<user_sessions::Model> {
        let session = user_sessions::ActiveModel::new(
            user_id.to_string(),
            chrono::Duration::hours(SESSION_TTL_HOURS),
        );
        Ok(session.insert(&self.db).await?)
    }
}
