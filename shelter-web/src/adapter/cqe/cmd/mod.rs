use sea_orm::{ActiveModelBehavior, ActiveModelTrait};
use serde::de::DeserializeOwned;
use validator::Validate;

pub mod animal;
pub mod employee;
pub mod food;
pub mod shelter;
pub mod volunteer;

/// A validated request body that knows how to fill its resource's active
/// model. Create bodies set every column; update bodies only what was sent.
pub trait SaveCmd: DeserializeOwned + Validate + Send + 'static {
    type Active: ActiveModelTrait + ActiveModelBehavior + Send + 'static;

    fn apply(self, active: &mut Self::Active);
}

