use async_graphql::*;
use serde::{Deserialize, Serialize};

// Floor-plan coordinates, shared by output and input
#[derive(SimpleObject, InputObject, Clone, Copy, Debug, Serialize, Deserialize)]
#[graphql(input_name = "PositionInput")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl From<crate::app_context::Position> for Position {
    fn from(position: crate::app_context::Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
        }
    }
}

impl From<Position> for crate::app_context::Position {
    fn from(position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
        }
    }
}
