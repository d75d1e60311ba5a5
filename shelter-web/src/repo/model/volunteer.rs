use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use shelter_common::{Resource, SearchField, SortField};
use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "volunteers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub description: String,
    pub role: String,
    pub organization: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum VolunteerSort {
    Id,
    Name,
    Surname,
    Age,
    Description,
    Role,
    Organization,
}

impl SortField for VolunteerSort {}

impl Resource for Entity {
    type Sort = VolunteerSort;
    const PLURAL: &'static str = "volunteers";
    const SEARCH: &'static [SearchField] = &[
        SearchField::new("name", "name"),
        SearchField::new("role", "role"),
    ];
}
