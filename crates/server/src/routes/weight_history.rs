use axum::{
    extract::{FromRef, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use deadpool_sqlite::Pool;
use shared::{
    api::{
        error::ServerError, payloads::RecordWeight, response_errors::WorkoutError, Object,
    },
    model::{NewWeightHistory, ValidateModel, WeightHistory},
};
use tracing::instrument;

use crate::{db::DatabaseConnection, progression::require_user};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Pool: FromRef<S>,
{
    Router::new().route(
        Object::WeightHistory.path(),
        get(list_weight_history).post(record_weight),
    )
}

/// Newest entry first
#[instrument(skip(conn))]
async fn list_weight_history(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<WeightHistory>>, ServerError<WorkoutError>> {
    let history = conn
        .interact(move |conn| {
            require_user(conn, user_id)?;
            Ok::<_, ServerError<WorkoutError>>(WeightHistory::fetch_for_user(conn, user_id)?)
        })
        .await??;

    Ok(Json(history))
}

#[instrument(skip(conn))]
async fn record_weight(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
    Json(record): Json<RecordWeight>,
) -> Result<(StatusCode, Json<WeightHistory>), ServerError<WorkoutError>> {
    record.validate()?;

    let entry = conn
        .interact(move |conn| {
            require_user(conn, user_id)?;
            Ok::<_, ServerError<WorkoutError>>(WeightHistory::create(
                conn,
                NewWeightHistory::now(user_id, record.weight),
            )?)
        })
        .await??;

    Ok((StatusCode::CREATED, Json(entry)))
}
