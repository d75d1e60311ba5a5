use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use shelter_common::{Resource, SearchField, SortField};
use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub position: String,
    pub shelter: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum EmployeeSort {
    Id,
    Name,
    Surname,
    Position,
    Shelter,
}

impl SortField for EmployeeSort {}

impl Resource for Entity {
    type Sort = EmployeeSort;
    const PLURAL: &'static str = "employees";
    const SEARCH: &'static [SearchField] = &[
        SearchField::new("name", "name"),
        SearchField::new("position", "position"),
    ];
}
