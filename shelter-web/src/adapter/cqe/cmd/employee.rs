use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::SaveCmd;
use crate::repo::model::employee;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeSaveCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: String,
    #[validate(length(min = 1, message = "must be provided"))]
    pub surname: String,
    #[validate(length(min = 1, message = "must be provided"))]
    pub position: String,
    #[validate(length(min = 1, message = "must be provided"))]
    pub shelter: String,
}

impl SaveCmd for EmployeeSaveCmd {
    type Active = employee::ActiveModel;

    fn apply(self, active: &mut employee::ActiveModel) {
        active.name = Set(self.name);
        active.surname = Set(self.surname);
        active.position = Set(self.position);
        active.shelter = Set(self.shelter);
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdateCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub surname: Option<String>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub position: Option<String>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub shelter: Option<String>,
}

impl SaveCmd for EmployeeUpdateCmd {
    type Active = employee::ActiveModel;

    fn apply(self, active: &mut employee::ActiveModel) {
        if let Some(v) = self.name {
            active.name = Set(v);
        }
        if let Some(v) = self.surname {
            active.surname = Set(v);
        }
        if let Some(v) = self.position {
            active.position = Set(v);
        }
        if let Some(v) = self.shelter {
            active.shelter = Set(v);
        }
    }
}
