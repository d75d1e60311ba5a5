use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use shelter_common::{Resource, SearchField, SortField};
use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "animals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: i32,
    pub shelter: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum AnimalSort {
    Id,
    Name,
    Species,
    Breed,
    Age,
    Shelter,
}

impl SortField for AnimalSort {}

impl Resource for Entity {
    type Sort = AnimalSort;
    const PLURAL: &'static str = "animals";
    const SEARCH: &'static [SearchField] = &[
        SearchField::new("name", "name"),
        SearchField::new("species", "species"),
    ];
}
