use axum::{
    extract::{FromRef, Path},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use deadpool_sqlite::Pool;
use shared::{
    api::{
        error::ServerError,
        payloads::{CreateExercise, Message, UpdateOneRepMax},
        response_errors::WorkoutError,
        Object,
    },
    model::{constants::is_protected_exercise, Exercise, ValidateModel},
};
use tracing::{info, instrument};

use crate::{
    db::DatabaseConnection,
    progression::{initialize_exercises, require_user, update_one_rep_max},
};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Pool: FromRef<S>,
{
    Router::new()
        .route(
            Object::Exercises.path(),
            get(list_exercises).post(add_exercises),
        )
        .route(
            Object::ExerciseId.path(),
            patch(update_exercise).delete(delete_exercise),
        )
}

#[instrument(skip(conn))]
async fn list_exercises(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Exercise>>, ServerError<WorkoutError>> {
    let exercises = conn
        .interact(move |conn| {
            require_user(conn, user_id)?;
            Ok::<_, ServerError<WorkoutError>>(Exercise::fetch_for_user(conn, user_id)?)
        })
        .await??;

    Ok(Json(exercises))
}

#[instrument(skip(conn))]
async fn add_exercises(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
    Json(exercises): Json<Vec<CreateExercise>>,
) -> Result<(StatusCode, Json<Vec<Exercise>>), ServerError<WorkoutError>> {
    exercises.validate()?;

    let created = conn
        .interact(move |conn| initialize_exercises(conn, user_id, exercises))
        .await??;

    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(conn))]
async fn update_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, exercise_id)): Path<(i64, i64)>,
    Json(update): Json<UpdateOneRepMax>,
) -> Result<Json<Exercise>, ServerError<WorkoutError>> {
    update.validate()?;

    let exercise = conn
        .interact(move |conn| update_one_rep_max(conn, user_id, exercise_id, update.one_rep_max))
        .await??;

    Ok(Json(exercise))
}

/// Deletes the exercise together with its plans. The main lifts can't be
/// deleted.
#[instrument(skip(conn))]
async fn delete_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path((user_id, exercise_id)): Path<(i64, i64)>,
) -> Result<Json<Message>, ServerError<WorkoutError>> {
    let name = conn
        .interact(move |conn| {
            let exercise = Exercise::fetch_owned(conn, user_id, exercise_id)?
                .ok_or(WorkoutError::ExerciseNotFound { exercise_id })?;
            if is_protected_exercise(&exercise.name) {
                Err(WorkoutError::ProtectedExercise {
                    name: exercise.name.clone(),
                })?;
            }

            Exercise::delete(conn, exercise.id)?;
            Ok::<_, ServerError<WorkoutError>>(exercise.name)
        })
        .await??;

    info!(user_id, exercise_id, exercise = %name, "Deleted exercise");
    Ok(Json(Message::new(format!("Exercise {name} deleted"))))
}
