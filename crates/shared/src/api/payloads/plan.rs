use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use rusqlite::Connection;

use crate::{
    api::error::ValidationError,
    model::{check_all, ValidateModel, WeekPlan, WorkoutSet},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlanWithSets {
    #[serde(flatten)]
    pub week_plan: WeekPlan,
    pub sets: Vec<WorkoutSet>,
}

#[cfg(feature = "backend")]
impl WeekPlanWithSets {
    pub fn fetch(conn: &Connection, week_plan: WeekPlan) -> rusqlite::Result<Self> {
        let sets = WorkoutSet::fetch_for_week_plan(conn, week_plan.id)?;
        Ok(Self { week_plan, sets })
    }

    pub fn fetch_all(conn: &Connection, week_plans: Vec<WeekPlan>) -> rusqlite::Result<Vec<Self>> {
        week_plans.into_iter().map(|p| Self::fetch(conn, p)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanVersionQuery {
    pub plan_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanVersionChange {
    pub plan_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmrapResult {
    pub set_id: i64,
    pub reps_performed: i64,
}

impl ValidateModel for AmrapResult {
    fn validate(&self) -> Result<(), ValidationError> {
        check_all([(self.reps_performed >= 0, "reps_performed can't be negative")])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmrapResponse {
    pub message: String,
    pub progress_weight: f64,
    /// Whether the performance earned a progress weight increment
    pub incremented: bool,
}
