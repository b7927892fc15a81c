use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::database::entities::{areas, orders, tables};
use crate::database::entities::orders::OrderStatus;
use crate::errors::{CoreError, CoreResult};

mod area_operations;
mod order_operations;
mod table_operations;

/// Shared application context exposing the floor and ordering operations.
///
/// Every operation takes the calling actor explicitly; there is no ambient
/// request state. `None` means the caller is not authenticated.
#[derive(Clone)]
pub struct AppContext {
    db: DatabaseConnection,
}

impl AppContext {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Floor-plan coordinates of a table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn to_json(self) -> CoreResult<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| CoreError::internal("Failed to encode position").with_source(e))
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<areas::Model> for AreaSummary {
    fn from(model: areas::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub id: String,
    pub table_number: i32,
    pub diners: i32,
    pub position: Option<Position>,
    pub area_id: String,
    pub reserved: bool,
    pub special_requests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<tables::Model> for TableSummary {
    fn from(model: tables::Model) -> Self {
        let special_requests = model.special_requests_parsed();
        let position = model
            .position
            .and_then(|value| serde_json::from_value::<Position>(value).ok());

        Self {
            id: model.id,
            table_number: model.table_number,
            diners: model.diners,
            position,
            area_id: model.area_id,
            reserved: model.reserved,
            special_requests,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub order_number: String,
    pub cart: serde_json::Value,
    pub user_name: String,
    pub user_email: String,
    pub table_id: String,
    pub status: OrderStatus,
    pub service_fee: f64,
    pub discount: Option<f64>,
    pub total: f64,
    pub note: Option<String>,
    pub payment_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<orders::Model> for OrderSummary {
    fn from(model: orders::Model) -> Self {
        // Rows are only ever written through this crate, so an unknown
        // status can only come from manual edits; surface it as PREPARING
        let status = model.status_parsed().unwrap_or(OrderStatus::Preparing);

        Self {
            id: model.id,
            order_number: model.order_number,
            cart: model.cart,
            user_name: model.user_name,
            user_email: model.user_email,
            table_id: model.table_id,
            status,
            service_fee: model.service_fee,
            discount: model.discount,
            total: model.total,
            note: model.note,
            payment_token: model.payment_token,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewTable {
    pub table_number: i32,
    pub diners: i32,
    pub position: Option<Position>,
    pub area_id: String,
    pub reserved: bool,
    pub special_requests: Vec<String>,
}

impl NewTable {
    pub fn new(table_number: i32, diners: i32, area_id: impl Into<String>) -> Self {
        Self {
            table_number,
            diners,
            position: None,
            area_id: area_id.into(),
            reserved: false,
            special_requests: Vec::new(),
        }
    }
}

/// Partial table update. `None` leaves the stored value untouched.
///
/// `position` is nullable in storage, so it has a second level:
/// `Some(None)` clears it, `Some(Some(p))` sets it.
#[derive(Clone, Debug, Default)]
pub struct TableUpdate {
    pub table_number: Option<i32>,
    pub diners: Option<i32>,
    pub position: Option<Option<Position>>,
    pub area_id: Option<String>,
    pub reserved: Option<bool>,
    pub special_requests: Option<Vec<String>>,
}

impl TableUpdate {
    pub fn is_empty(&self) -> bool {
        self.table_number.is_none()
            && self.diners.is_none()
            && self.position.is_none()
            && self.area_id.is_none()
            && self.reserved.is_none()
            && self.special_requests.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct NewOrder {
    pub table_id: String,
    pub order_number: String,
    pub cart: serde_json::Value,
    pub user_name: String,
    pub user_email: String,
    pub service_fee: f64,
    pub total: f64,
    pub discount: Option<f64>,
    pub note: Option<String>,
    pub payment_token: Option<String>,
}

fn require_positive(field: &str, value: i32) -> CoreResult<()> {
    if value <= 0 {
        return Err(CoreError::validation(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(())
}

fn require_amount(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::validation(format!(
            "{} must be a non-negative amount",
            field
        )));
    }
    Ok(())
}

fn require_position(position: Position) -> CoreResult<()> {
    if !position.x.is_finite() || !position.y.is_finite() {
        return Err(CoreError::validation(
            "position coordinates must be finite numbers",
        ));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
