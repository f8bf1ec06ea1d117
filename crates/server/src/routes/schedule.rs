use std::collections::HashSet;

use axum::{
    extract::{FromRef, Path, Query},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::{Datelike, Days, NaiveDate, Utc};
use deadpool_sqlite::Pool;
use rusqlite::Connection;
use shared::{
    api::{
        error::ServerError,
        payloads::{
            CreateTrainingPlan, Message, ScheduleExercise, ScheduleRange,
            TrainingPlanWithExercises, UpdateScheduleExercise, UpdateTrainingPlan,
        },
        response_errors::WorkoutError,
        Object,
    },
    model::{
        Exercise, ExerciseSchedule, NewTrainingPlanSchedule, TrainingPlanSchedule, ValidateModel,
    },
};
use tracing::{info, instrument};

use crate::{db::DatabaseConnection, progression::require_user};

type ScheduleResult<T> = Result<T, ServerError<WorkoutError>>;

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Pool: FromRef<S>,
{
    Router::new()
        .route(
            Object::TrainingSchedule.path(),
            get(list_plans).post(create_plan),
        )
        .route(Object::TrainingScheduleDay.path(), get(plans_for_day))
        .route(
            Object::TrainingScheduleCurrentWeek.path(),
            get(plans_for_current_week),
        )
        .route(
            Object::TrainingScheduleId.path(),
            get(fetch_plan).patch(update_plan).delete(delete_plan),
        )
        .route(
            Object::TrainingScheduleExercises.path(),
            post(add_plan_exercise),
        )
        .route(
            Object::TrainingScheduleExerciseId.path(),
            patch(update_plan_exercise).delete(delete_plan_exercise),
        )
}

fn require_plan(conn: &Connection, user_id: i64, plan_id: i64) -> ScheduleResult<TrainingPlanSchedule> {
    Ok(TrainingPlanSchedule::fetch_owned(conn, user_id, plan_id)?
        .ok_or(WorkoutError::SchedulePlanNotFound { plan_id })?)
}

fn require_plan_exercise(
    conn: &Connection,
    plan_id: i64,
    exercise_schedule_id: i64,
) -> ScheduleResult<ExerciseSchedule> {
    Ok(ExerciseSchedule::fetch_in_plan(conn, plan_id, exercise_schedule_id)?
        .ok_or(WorkoutError::ExerciseScheduleNotFound {
            exercise_schedule_id,
        })?)
}

fn plans_between(
    conn: &Connection,
    user_id: i64,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
) -> ScheduleResult<Vec<TrainingPlanWithExercises>> {
    require_user(conn, user_id)?;
    let plans = TrainingPlanSchedule::fetch_for_user(conn, user_id, from_date, to_date)?;
    Ok(TrainingPlanWithExercises::fetch_all(conn, plans)?)
}

/// Monday to Sunday of the week containing `day`
fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let since_monday = u64::from(day.weekday().num_days_from_monday());
    let monday = day - Days::new(since_monday);
    (monday, monday + Days::new(6))
}

#[instrument(skip(conn))]
async fn list_plans(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
    Query(range): Query<ScheduleRange>,
) -> ScheduleResult<Json<Vec<TrainingPlanWithExercises>>> {
    let plans = conn
        .interact(move |conn| plans_between(conn, user_id, range.from_date, range.to_date))
        .await??;

    Ok(Json(plans))
}

#[instrument(skip(conn))]
async fn plans_for_day(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, day_date)): Path<(i64, NaiveDate)>,
) -> ScheduleResult<Json<Vec<TrainingPlanWithExercises>>> {
    let plans = conn
        .interact(move |conn| plans_between(conn, user_id, Some(day_date), Some(day_date)))
        .await??;

    Ok(Json(plans))
}

#[instrument(skip(conn))]
async fn plans_for_current_week(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
) -> ScheduleResult<Json<Vec<TrainingPlanWithExercises>>> {
    let (monday, sunday) = week_bounds(Utc::now().date_naive());

    let plans = conn
        .interact(move |conn| plans_between(conn, user_id, Some(monday), Some(sunday)))
        .await??;

    Ok(Json(plans))
}

#[instrument(skip(conn))]
async fn fetch_plan(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, plan_id)): Path<(i64, i64)>,
) -> ScheduleResult<Json<TrainingPlanWithExercises>> {
    let plan = conn
        .interact(move |conn| {
            let plan = require_plan(conn, user_id, plan_id)?;
            Ok::<_, ServerError<WorkoutError>>(TrainingPlanWithExercises::fetch(conn, plan)?)
        })
        .await??;

    Ok(Json(plan))
}

/// Creates a plan with its exercise prescriptions. Every exercise has to
/// belong to the user.
#[instrument(skip(conn))]
async fn create_plan(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
    Json(new_plan): Json<CreateTrainingPlan>,
) -> ScheduleResult<(StatusCode, Json<TrainingPlanWithExercises>)> {
    new_plan.validate()?;

    let plan = conn
        .interact(move |conn| {
            let tx = conn.transaction()?;
            require_user(&tx, user_id)?;

            let owned: HashSet<i64> = Exercise::fetch_for_user(&tx, user_id)?
                .into_iter()
                .map(|e| e.id)
                .collect();
            let mut exercise_ids: Vec<i64> = new_plan
                .exercises
                .iter()
                .map(|e| e.exercise_id)
                .filter(|id| !owned.contains(id))
                .collect();
            if !exercise_ids.is_empty() {
                exercise_ids.sort_unstable();
                exercise_ids.dedup();
                Err(WorkoutError::ExercisesNotOwned { exercise_ids })?;
            }

            let plan = TrainingPlanSchedule::create(
                &tx,
                NewTrainingPlanSchedule {
                    user_id,
                    name: new_plan.name,
                    scheduled_date: new_plan.scheduled_date,
                    notes: new_plan.notes,
                    created_at: Utc::now(),
                },
            )?;
            for exercise in new_plan.exercises {
                ExerciseSchedule::create(&tx, exercise.into_new(plan.id))?;
            }
            let plan = TrainingPlanWithExercises::fetch(&tx, plan)?;

            tx.commit()?;
            Ok::<_, ServerError<WorkoutError>>(plan)
        })
        .await??;

    info!(user_id, plan_id = plan.plan.id, "Created training plan");
    Ok((StatusCode::CREATED, Json(plan)))
}

#[instrument(skip(conn))]
async fn update_plan(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, plan_id)): Path<(i64, i64)>,
    Json(update): Json<UpdateTrainingPlan>,
) -> ScheduleResult<Json<TrainingPlanWithExercises>> {
    update.validate()?;

    let plan = conn
        .interact(move |conn| {
            let mut plan = require_plan(conn, user_id, plan_id)?;
            update.apply(&mut plan);
            plan.update(conn)?;
            Ok::<_, ServerError<WorkoutError>>(TrainingPlanWithExercises::fetch(conn, plan)?)
        })
        .await??;

    Ok(Json(plan))
}

#[instrument(skip(conn))]
async fn delete_plan(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, plan_id)): Path<(i64, i64)>,
) -> ScheduleResult<Json<Message>> {
    conn.interact(move |conn| {
        let plan = require_plan(conn, user_id, plan_id)?;
        TrainingPlanSchedule::delete(conn, plan.id)?;
        Ok::<_, ServerError<WorkoutError>>(())
    })
    .await??;

    Ok(Json(Message::new(format!("Training plan {plan_id} deleted"))))
}

#[instrument(skip(conn))]
async fn add_plan_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, plan_id)): Path<(i64, i64)>,
    Json(exercise): Json<ScheduleExercise>,
) -> ScheduleResult<(StatusCode, Json<ExerciseSchedule>)> {
    exercise.validate()?;

    let created = conn
        .interact(move |conn| {
            let plan = require_plan(conn, user_id, plan_id)?;
            if Exercise::fetch_owned(conn, user_id, exercise.exercise_id)?.is_none() {
                Err(WorkoutError::ExerciseNotFound {
                    exercise_id: exercise.exercise_id,
                })?;
            }
            Ok::<_, ServerError<WorkoutError>>(ExerciseSchedule::create(
                conn,
                exercise.into_new(plan.id),
            )?)
        })
        .await??;

    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(conn))]
async fn update_plan_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, plan_id, exercise_schedule_id)): Path<(i64, i64, i64)>,
    Json(update): Json<UpdateScheduleExercise>,
) -> ScheduleResult<Json<ExerciseSchedule>> {
    update.validate()?;

    let exercise = conn
        .interact(move |conn| {
            let plan = require_plan(conn, user_id, plan_id)?;
            let mut exercise = require_plan_exercise(conn, plan.id, exercise_schedule_id)?;
            update.apply(&mut exercise);
            exercise.update(conn)?;
            Ok::<_, ServerError<WorkoutError>>(exercise)
        })
        .await??;

    Ok(Json(exercise))
}

#[instrument(skip(conn))]
async fn delete_plan_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, plan_id, exercise_schedule_id)): Path<(i64, i64, i64)>,
) -> ScheduleResult<Json<Message>> {
    conn.interact(move |conn| {
        let plan = require_plan(conn, user_id, plan_id)?;
        let exercise = require_plan_exercise(conn, plan.id, exercise_schedule_id)?;
        ExerciseSchedule::delete(conn, exercise.id)?;
        Ok::<_, ServerError<WorkoutError>>(())
    })
    .await??;

    Ok(Json(Message::new(format!(
        "Exercise schedule {exercise_schedule_id} deleted"
    ))))
}
