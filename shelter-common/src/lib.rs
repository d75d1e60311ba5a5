//! common

mod filter;
mod metadata;
mod plan;
mod resource;
mod sort;

pub use filter::*;
pub use metadata::*;
pub use plan::*;
pub use resource::*;
pub use sort::*;
