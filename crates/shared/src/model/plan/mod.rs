mod version;
pub use version::*;

mod lift;
pub use lift::*;

pub mod catalog;
pub use catalog::{Prescription, PlanComparison};
