use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::SaveCmd;
use crate::repo::model::animal;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnimalSaveCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: String,
    #[validate(length(min = 1, message = "must be provided"))]
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub age: i32,
    #[validate(length(min = 1, message = "must be provided"))]
    pub shelter: String,
}

impl SaveCmd for AnimalSaveCmd {
    type Active = animal::ActiveModel;

    fn apply(self, active: &mut animal::ActiveModel) {
        active.name = Set(self.name);
        active.species = Set(self.species);
        active.breed = Set(self.breed);
        active.age = Set(self.age);
        active.shelter = Set(self.shelter);
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AnimalUpdateCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub species: Option<String>,
    pub breed: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub age: Option<i32>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub shelter: Option<String>,
}

impl SaveCmd for AnimalUpdateCmd {
    type Active = animal::ActiveModel;

    fn apply(self, active: &mut animal::ActiveModel) {
        if let Some(v) = self.name {
            active.name = Set(v);
        }
        if let Some(v) = self.species {
            active.species = Set(v);
        }
        if let Some(v) = self.breed {
            active.breed = Set(v);
        }
        if let Some(v) = self.age {
            active.age = Set(v);
        }
        if let Some(v) = self.shelter {
            active.shelter = Set(v);
        }
    }
}
