use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use rusqlite::Connection;

use crate::{
    api::error::ValidationError,
    model::{check_all, ExerciseSchedule, NewExerciseSchedule, TrainingPlanSchedule, ValidateModel},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlanWithExercises {
    #[serde(flatten)]
    pub plan: TrainingPlanSchedule,
    pub exercises: Vec<ExerciseSchedule>,
}

#[cfg(feature = "backend")]
impl TrainingPlanWithExercises {
    pub fn fetch(conn: &Connection, plan: TrainingPlanSchedule) -> rusqlite::Result<Self> {
        let exercises = ExerciseSchedule::fetch_for_plan(conn, plan.id)?;
        Ok(Self { plan, exercises })
    }

    pub fn fetch_all(
        conn: &Connection,
        plans: Vec<TrainingPlanSchedule>,
    ) -> rusqlite::Result<Vec<Self>> {
        plans.into_iter().map(|p| Self::fetch(conn, p)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRange {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleExercise {
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub rest_time: Option<i64>,
    pub notes: Option<String>,
}

impl ScheduleExercise {
    pub fn into_new(self, training_plan_id: i64) -> NewExerciseSchedule {
        NewExerciseSchedule {
            training_plan_id,
            exercise_id: self.exercise_id,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            rest_time: self.rest_time,
            notes: self.notes,
        }
    }
}

impl ValidateModel for ScheduleExercise {
    fn validate(&self) -> Result<(), ValidationError> {
        check_all([
            (self.sets > 0, "sets must be positive"),
            (self.reps > 0, "reps must be positive"),
            (self.weight >= 0.0, "weight can't be negative"),
            (
                self.rest_time.map_or(true, |r| r >= 0),
                "rest_time can't be negative",
            ),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTrainingPlan {
    pub name: String,
    pub scheduled_date: NaiveDate,
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ScheduleExercise>,
}

impl ValidateModel for CreateTrainingPlan {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error_messages = check_all([(!self.name.trim().is_empty(), "name can't be empty")])
            .err()
            .map(|e| e.error_messages)
            .unwrap_or_default();
        error_messages.extend(
            self.exercises
                .iter()
                .filter_map(|e| e.validate().err())
                .flat_map(|e| e.error_messages),
        );

        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { error_messages })
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTrainingPlan {
    pub name: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl ValidateModel for UpdateTrainingPlan {
    fn validate(&self) -> Result<(), ValidationError> {
        check_all([(
            self.name.as_ref().map_or(true, |n| !n.trim().is_empty()),
            "name can't be empty",
        )])
    }
}

impl UpdateTrainingPlan {
    pub fn apply(self, plan: &mut TrainingPlanSchedule) {
        if let Some(name) = self.name {
            plan.name = name;
        }
        if let Some(scheduled_date) = self.scheduled_date {
            plan.scheduled_date = scheduled_date;
        }
        if self.notes.is_some() {
            plan.notes = self.notes;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateScheduleExercise {
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub rest_time: Option<i64>,
    pub notes: Option<String>,
}

impl ValidateModel for UpdateScheduleExercise {
    fn validate(&self) -> Result<(), ValidationError> {
        check_all([
            (self.sets.map_or(true, |s| s > 0), "sets must be positive"),
            (self.reps.map_or(true, |r| r > 0), "reps must be positive"),
            (self.weight.map_or(true, |w| w >= 0.0), "weight can't be negative"),
            (
                self.rest_time.map_or(true, |r| r >= 0),
                "rest_time can't be negative",
            ),
        ])
    }
}

impl UpdateScheduleExercise {
    pub fn apply(self, exercise: &mut ExerciseSchedule) {
        if let Some(sets) = self.sets {
            exercise.sets = sets;
        }
        if let Some(reps) = self.reps {
            exercise.reps = reps;
        }
        if let Some(weight) = self.weight {
            exercise.weight = weight;
        }
        if self.rest_time.is_some() {
            exercise.rest_time = self.rest_time;
        }
        if self.notes.is_some() {
            exercise.notes = self.notes;
        }
    }
}
