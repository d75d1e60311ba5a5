mod cqe;

pub use cqe::*;
pub mod http;
