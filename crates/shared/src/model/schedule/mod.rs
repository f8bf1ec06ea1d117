mod training_plan;
pub use training_plan::*;

mod exercise_schedule;
pub use exercise_schedule::*;
