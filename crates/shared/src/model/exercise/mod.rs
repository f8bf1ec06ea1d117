mod exercise;
pub use exercise::*;

mod week_plan;
pub use week_plan::*;

mod set;
pub use set::*;
