pub mod diff;
pub mod model;

pub use crate::domain::ports::Schema;
pub use crate::domain::value::{Fields, Value};
pub use crate::utils::error::Result;
