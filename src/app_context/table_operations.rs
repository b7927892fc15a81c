use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};

use super::{
    require_position, require_positive, AppContext, NewTable, Position, TableSummary, TableUpdate,
};
use crate::auth::{authorize, policy, Actor};
use crate::database::entities::tables;
use crate::errors::{CoreError, CoreResult, WriteFailure};

impl AppContext {
    // ----- Table mutations -------------------------------------------------
    pub async fn add_table(&self, actor: Option<&Actor>, input: NewTable) -> CoreResult<TableSummary> {
        authorize(actor, policy::ADD_TABLE)?;
        require_positive("tableNumber", input.table_number)?;
        require_positive("diners", input.diners)?;
        if let Some(position) = input.position {
            require_position(position)?;
        }

        if self.find_table_by_number(input.table_number).await?.is_some() {
            return Err(duplicate_table_number(input.table_number));
        }

        let position = input.position.map(Position::to_json).transpose()?;
        let now = Utc::now();
        let table = tables::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            table_number: Set(input.table_number),
            diners: Set(input.diners),
            position: Set(position),
            area_id: Set(input.area_id.clone()),
            reserved: Set(input.reserved),
            special_requests: Set(serde_json::json!(input.special_requests)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The UNIQUE index settles races the lookup above cannot see
        let table = table
            .insert(&self.db)
            .await
            .map_err(|e| table_write_error(e, "create table", input.table_number, &input.area_id))?;

        info!(
            table_id = %table.id,
            table_number = table.table_number,
            "Created table"
        );
        Ok(TableSummary::from(table))
    }

    pub async fn edit_table(
        &self,
        actor: Option<&Actor>,
        id: &str,
        update: TableUpdate,
    ) -> CoreResult<TableSummary> {
        authorize(actor, policy::EDIT_TABLE)?;
        if let Some(table_number) = update.table_number {
            require_positive("tableNumber", table_number)?;
        }
        if let Some(diners) = update.diners {
            require_positive("diners", diners)?;
        }
        if let Some(Some(position)) = update.position {
            require_position(position)?;
        }

        let table = self.load_table(id).await?;

        if let Some(table_number) = update.table_number {
            if table_number != table.table_number
                && self.find_table_by_number(table_number).await?.is_some()
            {
                return Err(duplicate_table_number(table_number));
            }
        }

        let table_number = update.table_number.unwrap_or(table.table_number);
        let area_id = update.area_id.clone().unwrap_or_else(|| table.area_id.clone());

        let mut active: tables::ActiveModel = table.into();
        if let Some(table_number) = update.table_number {
            active.table_number = Set(table_number);
        }
        if let Some(diners) = update.diners {
            active.diners = Set(diners);
        }
        if let Some(position) = update.position {
            active.position = Set(position.map(Position::to_json).transpose()?);
        }
        if let Some(area_id) = update.area_id {
            active.area_id = Set(area_id);
        }
        if let Some(reserved) = update.reserved {
            active.reserved = Set(reserved);
        }
        if let Some(special_requests) = update.special_requests {
            active.special_requests = Set(serde_json::json!(special_requests));
        }
        active.updated_at = Set(Utc::now());

        let table = active
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::not_found("Table", id),
                e => table_write_error(e, "update table", table_number, &area_id),
            })?;

        info!(table_id = %table.id, "Edited table");
        Ok(TableSummary::from(table))
    }

    pub async fn delete_table(&self, actor: Option<&Actor>, id: &str) -> CoreResult<()> {
        authorize(actor, policy::DELETE_TABLE)?;

        let result = tables::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| match WriteFailure::from(e) {
                WriteFailure::ForeignKey => {
                    CoreError::conflict(format!("Table '{}' still has orders", id))
                }
                WriteFailure::Unique => CoreError::internal("Unexpected unique violation on delete"),
                WriteFailure::Other(e) => CoreError::database("delete table", e),
            })?;

        if result.rows_affected == 0 {
            return Err(CoreError::not_found("Table", id));
        }

        info!(table_id = %id, "Deleted table");
        Ok(())
    }

    pub async fn toggle_table_reservation(
        &self,
        actor: Option<&Actor>,
        id: &str,
        reserved: bool,
    ) -> CoreResult<TableSummary> {
        authorize(actor, policy::TOGGLE_TABLE_RESERVATION)?;

        let table = self.load_table(id).await?;
        let mut active: tables::ActiveModel = table.into();
        active.reserved = Set(reserved);
        active.updated_at = Set(Utc::now());

        let table = active
            .update(&self.db)
            .await
            .map_err(|e| update_error(e, "update table reservation", id))?;

        info!(table_id = %table.id, reserved, "Set table reservation");
        Ok(TableSummary::from(table))
    }

    /// Floor-plan drag and drop addresses tables by number, not id.
    pub async fn move_position_table(
        &self,
        actor: Option<&Actor>,
        table_number: i32,
        position: Position,
    ) -> CoreResult<TableSummary> {
        authorize(actor, policy::MOVE_POSITION_TABLE)?;
        require_position(position)?;

        let table = self
            .find_table_by_number(table_number)
            .await?
            .ok_or_else(|| CoreError::not_found("Table", table_number.to_string()))?;

        let id = table.id.clone();
        let mut active: tables::ActiveModel = table.into();
        active.position = Set(Some(position.to_json()?));
        active.updated_at = Set(Utc::now());

        let table = active
            .update(&self.db)
            .await
            .map_err(|e| update_error(e, "update table position", &id))?;

        debug!(
            table_number,
            x = position.x,
            y = position.y,
            "Moved table"
        );
        Ok(TableSummary::from(table))
    }

    // ----- Table queries ---------------------------------------------------
    pub async fn list_tables(
        &self,
        actor: Option<&Actor>,
        area_id: Option<&str>,
    ) -> CoreResult<Vec<TableSummary>> {
        authorize(actor, policy::READ_FLOOR)?;

        let mut query = tables::Entity::find().order_by_asc(tables::Column::TableNumber);
        if let Some(area_id) = area_id {
            query = query.filter(tables::Column::AreaId.eq(area_id));
        }

        let tables = query
            .all(&self.db)
            .await
            .map_err(|e| CoreError::database("list tables", e))?;

        Ok(tables.into_iter().map(TableSummary::from).collect())
    }

    pub async fn get_table(&self, actor: Option<&Actor>, id: &str) -> CoreResult<Option<TableSummary>> {
        authorize(actor, policy::READ_FLOOR)?;

        let table = tables::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("load table", e))?;

        Ok(table.map(TableSummary::from))
    }

    async fn load_table(&self, id: &str) -> CoreResult<tables::Model> {
        tables::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("load table", e))?
            .ok_or_else(|| CoreError::not_found("Table", id))
    }

    async fn find_table_by_number(&self, table_number: i32) -> CoreResult<Option<tables::Model>> {
        tables::Entity::find()
            .filter(tables::Column::TableNumber.eq(table_number))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("find table by number", e))
    }
}

fn duplicate_table_number(table_number: i32) -> CoreError {
    CoreError::conflict(format!("duplicate tableNumber {}", table_number))
}

fn table_write_error(err: DbErr, operation: &str, table_number: i32, area_id: &str) -> CoreError {
    match WriteFailure::from(err) {
        WriteFailure::Unique => duplicate_table_number(table_number),
        WriteFailure::ForeignKey => CoreError::not_found("Area", area_id),
        WriteFailure::Other(e) => CoreError::database(operation, e),
    }
}

/// The row can disappear between the load and the write.
fn update_error(err: DbErr, operation: &str, id: &str) -> CoreError {
    match err {
        DbErr::RecordNotUpdated => CoreError::not_found("Table", id),
        e => CoreError::database(operation, e),
    }
}
