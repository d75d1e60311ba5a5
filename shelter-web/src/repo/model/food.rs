use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use shelter_common::{Resource, SearchField, SortField};
use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "foods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: i32,
    pub shelter: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum FoodSort {
    Id,
    Name,
    Type,
    Quantity,
    Shelter,
}

impl SortField for FoodSort {}

impl Resource for Entity {
    type Sort = FoodSort;
    const PLURAL: &'static str = "foods";
    const SEARCH: &'static [SearchField] = &[
        SearchField::new("name", "name"),
        SearchField::new("type", "type"),
    ];
}
