use std::ops::RangeInclusive;

/// Weeks covered by a training cycle
pub const PLAN_WEEKS: RangeInclusive<i64> = 1..=6;

/// One rep max given to exercises created without one
pub const DEFAULT_ONE_REP_MAX: f64 = 100.0;

/// Exercises every user must have. They can't be deleted.
pub const MANDATORY_EXERCISES: [&str; 3] = ["squats", "dead_lift", "bench_press"];

/// An AMRAP set counts as overachieved once `reps * AMRAP_OVERACHIEVEMENT_FACTOR` are performed
pub const AMRAP_OVERACHIEVEMENT_FACTOR: i64 = 2;

pub const BENCH_PRESS_INCREMENT: f64 = 2.5;
pub const DEFAULT_INCREMENT: f64 = 5.0;

pub fn is_plan_week(week_number: i64) -> bool {
    PLAN_WEEKS.contains(&week_number)
}

pub fn is_protected_exercise(name: &str) -> bool {
    MANDATORY_EXERCISES.contains(&name)
}

/// Amount added to an exercise's progress weight when an AMRAP set is overachieved
pub fn progress_increment(exercise_name: &str) -> f64 {
    if exercise_name == "bench_press" {
        BENCH_PRESS_INCREMENT
    } else {
        DEFAULT_INCREMENT
    }
}

/// Weight of a set given the exercise's current one rep max and progress weight
pub fn set_weight(one_rep_max: f64, percentage: f64, progress_weight: f64) -> f64 {
    one_rep_max * (percentage / 100.0) + progress_weight
}
