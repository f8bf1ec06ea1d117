use axum::{
    extract::{FromRef, Path, Query},
    routing::{get, post},
    Json, Router,
};
use deadpool_sqlite::Pool;
use shared::{
    api::{
        error::ServerError,
        payloads::{AmrapResponse, AmrapResult, PlanVersionQuery, WeekPlanWithSets},
        response_errors::WorkoutError,
        Object,
    },
    model::{
        constants::is_plan_week,
        plan::catalog::{self, PlanComparison},
        PlanVersion, ValidateModel,
    },
};
use tracing::instrument;

use crate::{
    db::DatabaseConnection,
    progression::{ensure_week_plan, record_amrap},
};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Pool: FromRef<S>,
{
    Router::new()
        .route(Object::WeekPlan.path(), get(week_plan))
        .route(Object::Amrap.path(), post(amrap))
        .route(Object::ComparePlans.path(), get(compare_plans))
}

/// Plans for the week, generated on first access. Without a `plan_version`
/// the user's own version is used.
#[instrument(skip(conn))]
async fn week_plan(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, week_number)): Path<(i64, i64)>,
    Query(query): Query<PlanVersionQuery>,
) -> Result<Json<Vec<WeekPlanWithSets>>, ServerError<WorkoutError>> {
    let plan_version = query
        .plan_version
        .as_deref()
        .map(str::parse::<PlanVersion>)
        .transpose()?;

    let plans = conn
        .interact(move |conn| ensure_week_plan(conn, user_id, week_number, plan_version))
        .await??;

    Ok(Json(plans))
}

#[instrument(skip(conn))]
async fn amrap(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, week_number)): Path<(i64, i64)>,
    Json(result): Json<AmrapResult>,
) -> Result<Json<AmrapResponse>, ServerError<WorkoutError>> {
    result.validate()?;
    if !is_plan_week(week_number) {
        Err(WorkoutError::InvalidWeekNumber { week_number })?;
    }

    let outcome = conn
        .interact(move |conn| record_amrap(conn, user_id, result.set_id, result.reps_performed))
        .await??;

    let message = if outcome.incremented {
        "AMRAP overachieved, progress weight increased"
    } else {
        "AMRAP recorded"
    };

    Ok(Json(AmrapResponse {
        message: message.to_owned(),
        progress_weight: outcome.progress_weight,
        incremented: outcome.incremented,
    }))
}

async fn compare_plans() -> Json<PlanComparison> {
    Json(catalog::comparison())
}
