// Mutation root, split by the record each group writes.

mod area;
mod order;
mod table;

use async_graphql::*;

/// Main mutation root that combines all mutation submodules
#[derive(Default, MergedObject)]
pub struct Mutation(
    pub area::AreaMutation,
    pub order::OrderMutation,
    pub table::TableMutation,
);
