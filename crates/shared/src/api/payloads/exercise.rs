use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {crate::model::WeekPlan, rusqlite::Connection};

use super::WeekPlanWithSets;
use crate::{
    api::error::ValidationError,
    model::{check_all, constants::DEFAULT_ONE_REP_MAX, Exercise, ValidateModel},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseWithPlans {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub week_plans: Vec<WeekPlanWithSets>,
}

#[cfg(feature = "backend")]
impl ExerciseWithPlans {
    pub fn fetch(conn: &Connection, exercise: Exercise) -> rusqlite::Result<Self> {
        let week_plans =
            WeekPlanWithSets::fetch_all(conn, WeekPlan::fetch_for_exercise(conn, exercise.id)?)?;
        Ok(Self {
            exercise,
            week_plans,
        })
    }
}

fn default_one_rep_max() -> f64 {
    DEFAULT_ONE_REP_MAX
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    #[serde(default = "default_one_rep_max")]
    pub one_rep_max: f64,
}

impl ValidateModel for CreateExercise {
    fn validate(&self) -> Result<(), ValidationError> {
        check_all([
            (!self.name.trim().is_empty(), "name can't be empty"),
            (self.one_rep_max > 0.0, "one_rep_max must be positive"),
        ])
    }
}

impl ValidateModel for Vec<CreateExercise> {
    fn validate(&self) -> Result<(), ValidationError> {
        let error_messages: Vec<String> = self
            .iter()
            .filter_map(|e| e.validate().err())
            .flat_map(|e| e.error_messages)
            .collect();

        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { error_messages })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOneRepMax {
    pub one_rep_max: f64,
}

impl ValidateModel for UpdateOneRepMax {
    fn validate(&self) -> Result<(), ValidationError> {
        check_all([(self.one_rep_max > 0.0, "one_rep_max must be positive")])
    }
}
