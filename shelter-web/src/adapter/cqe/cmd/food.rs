use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::SaveCmd;
use crate::repo::model::food;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodSaveCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "must be provided"))]
    pub kind: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "must be provided"))]
    pub shelter: String,
}

impl SaveCmd for FoodSaveCmd {
    type Active = food::ActiveModel;

    fn apply(self, active: &mut food::ActiveModel) {
        active.name = Set(self.name);
        active.kind = Set(self.kind);
        active.quantity = Set(self.quantity);
        active.shelter = Set(self.shelter);
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FoodUpdateCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "must be provided"))]
    pub kind: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub quantity: Option<i32>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub shelter: Option<String>,
}

impl SaveCmd for FoodUpdateCmd {
    type Active = food::ActiveModel;

    fn apply(self, active: &mut food::ActiveModel) {
        if let Some(v) = self.name {
            active.name = Set(v);
        }
        if let Some(v) = self.kind {
            active.kind = Set(v);
        }
        if let Some(v) = self.quantity {
            active.quantity = Set(v);
        }
        if let Some(v) = self.shelter {
            active.shelter = Set(v);
        }
    }
}
