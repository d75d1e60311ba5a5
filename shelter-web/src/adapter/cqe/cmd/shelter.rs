use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::SaveCmd;
use crate::repo::model::shelter;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShelterSaveCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: String,
    #[validate(length(min = 1, message = "must be provided"))]
    pub address: String,
    #[validate(length(min = 1, message = "must be provided"))]
    pub city: String,
    #[validate(range(min = 1, message = "must be greater than zero"))]
    pub capacity: i32,
}

impl SaveCmd for ShelterSaveCmd {
    type Active = shelter::ActiveModel;

    fn apply(self, active: &mut shelter::ActiveModel) {
        active.name = Set(self.name);
        active.address = Set(self.address);
        active.city = Set(self.city);
        active.capacity = Set(self.capacity);
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ShelterUpdateCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub city: Option<String>,
    #[validate(range(min = 1, message = "must be greater than zero"))]
    pub capacity: Option<i32>,
}

impl SaveCmd for ShelterUpdateCmd {
    type Active = shelter::ActiveModel;

    fn apply(self, active: &mut shelter::ActiveModel) {
        if let Some(v) = self.name {
            active.name = Set(v);
        }
        if let Some(v) = self.address {
            active.address = Set(v);
        }
        if let Some(v) = self.city {
            active.city = Set(v);
        }
        if let Some(v) = self.capacity {
            active.capacity = Set(v);
        }
    }
}
