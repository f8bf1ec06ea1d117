use const_format::concatcp;
pub mod error;
pub mod payloads;
pub mod response_errors;

pub const API_BASE_PATH: &str = "/api/";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Ping,
    Users,
    UserLogin,
    UserId,
    UserPlanVersion,
    WeightHistory,
    Exercises,
    ExerciseId,
    WeekPlan,
    Amrap,
    ComparePlans,
    TrainingSchedule,
    TrainingScheduleDay,
    TrainingScheduleCurrentWeek,
    TrainingScheduleId,
    TrainingScheduleExercises,
    TrainingScheduleExerciseId,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Ping => concatcp!(API_BASE_PATH, "ping"),
            Users => concatcp!(API_BASE_PATH, "users"),
            UserLogin => concatcp!(API_BASE_PATH, "users/login"),
            UserId => concatcp!(API_BASE_PATH, "users/:user_id"),
            UserPlanVersion => concatcp!(API_BASE_PATH, "users/:user_id/plan_version"),
            WeightHistory => concatcp!(API_BASE_PATH, "users/:user_id/weight_history"),
            Exercises => concatcp!(API_BASE_PATH, "users/:user_id/exercises"),
            ExerciseId => concatcp!(API_BASE_PATH, "users/:user_id/exercises/:exercise_id"),
            WeekPlan => concatcp!(API_BASE_PATH, "users/:user_id/plan/week/:week_number"),
            Amrap => concatcp!(API_BASE_PATH, "users/:user_id/plan/week/:week_number/amrap"),
            ComparePlans => concatcp!(API_BASE_PATH, "plans/compare"),
            TrainingSchedule => concatcp!(API_BASE_PATH, "users/:user_id/training_schedule"),
            TrainingScheduleDay => {
                concatcp!(API_BASE_PATH, "users/:user_id/training_schedule/day/:day_date")
            },
            TrainingScheduleCurrentWeek => {
                concatcp!(API_BASE_PATH, "users/:user_id/training_schedule/current_week")
            },
            TrainingScheduleId => {
                concatcp!(API_BASE_PATH, "users/:user_id/training_schedule/:plan_id")
            },
            TrainingScheduleExercises => {
                concatcp!(API_BASE_PATH, "users/:user_id/training_schedule/:plan_id/exercises")
            },
            TrainingScheduleExerciseId => concatcp!(
                API_BASE_PATH,
                "users/:user_id/training_schedule/:plan_id/exercises/:exercise_schedule_id"
            ),
        }
    }

    /// Substitutes the `:name` segments of the path in order
    pub fn url(&self, params: &[&dyn std::fmt::Display]) -> String {
        let mut params = params.iter();
        self.path()
            .split('/')
            .map(|segment| {
                if segment.starts_with(':') {
                    if let Some(p) = params.next() {
                        return p.to_string();
                    }
                }
                segment.to_owned()
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}
