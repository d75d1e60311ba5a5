//! entities

pub mod animal;
pub mod employee;
pub mod food;
pub mod shelter;
pub mod volunteer;
