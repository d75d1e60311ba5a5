use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::SaveCmd;
use crate::repo::model::volunteer;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VolunteerSaveCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: String,
    #[validate(length(min = 1, message = "must be provided"))]
    pub surname: String,
    #[validate(range(min = 0, max = 150, message = "must be a valid age"))]
    pub age: i32,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "must be provided"))]
    pub role: String,
    #[serde(default)]
    pub organization: String,
}

impl SaveCmd for VolunteerSaveCmd {
    type Active = volunteer::ActiveModel;

    fn apply(self, active: &mut volunteer::ActiveModel) {
        active.name = Set(self.name);
        active.surname = Set(self.surname);
        active.age = Set(self.age);
        active.description = Set(self.description);
        active.role = Set(self.role);
        active.organization = Set(self.organization);
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VolunteerUpdateCmd {
    #[validate(length(min = 1, message = "must be provided"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub surname: Option<String>,
    #[validate(range(min = 0, max = 150, message = "must be a valid age"))]
    pub age: Option<i32>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "must be provided"))]
    pub role: Option<String>,
    pub organization: Option<String>,
}

impl SaveCmd for VolunteerUpdateCmd {
    type Active = volunteer::ActiveModel;

    fn apply(self, active: &mut volunteer::ActiveModel) {
        if let Some(v) = self.name {
            active.name = Set(v);
        }
        if let Some(v) = self.surname {
            active.surname = Set(v);
        }
        if let Some(v) = self.age {
            active.age = Set(v);
        }
        if let Some(v) = self.description {
            active.description = Set(v);
        }
        if let Some(v) = self.role {
            active.role = Set(v);
        }
        if let Some(v) = self.organization {
            active.organization = Set(v);
        }
    }
}
