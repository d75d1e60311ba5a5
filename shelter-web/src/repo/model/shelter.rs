use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use shelter_common::{Resource, SearchField, SortField};
use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shelters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub capacity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum ShelterSort {
    Id,
    Name,
    Address,
    City,
    Capacity,
}

impl SortField for ShelterSort {}

impl Resource for Entity {
    type Sort = ShelterSort;
    const PLURAL: &'static str = "shelters";
    const SEARCH: &'static [SearchField] = &[
        SearchField::new("name", "name"),
        SearchField::new("city", "city"),
    ];
}
