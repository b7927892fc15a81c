#![allow(dead_code)]

use anyhow::Result;
use bistro::app_context::{AppContext, NewTable, TableSummary};
use bistro::auth::{Actor, Role};
use bistro::database::connection::{establish_connection, setup_database};
use bistro::database::entities::areas;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tempfile::NamedTempFile;

/// Create a file-backed test database with migrations applied.
///
/// The temp file must outlive the connection, so it is returned alongside.
pub async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = establish_connection(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

pub async fn setup_app() -> Result<(AppContext, NamedTempFile)> {
    let (db, temp_file) = setup_test_db().await?;
    Ok((AppContext::new(db), temp_file))
}

pub async fn seed_area(db: &DatabaseConnection, name: &str) -> Result<String> {
    let area = areas::ActiveModel {
        id: Set(format!("area-{}", name.to_lowercase())),
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await?;

    Ok(area.id)
}

pub async fn seed_table(app: &AppContext, table_number: i32, area_id: &str) -> Result<TableSummary> {
    let mut input = NewTable::new(table_number, 4, area_id);
    input.special_requests = vec!["window".to_string()];
    Ok(app.add_table(Some(&admin()), input).await?)
}

pub fn actor(role: Role) -> Actor {
    Actor::new(format!("user-{}", role.as_str().to_lowercase()), role)
}

pub fn admin() -> Actor {
    actor(Role::Admin)
}
