use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, Query},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use deadpool_sqlite::Pool;
use rusqlite::TransactionBehavior;
use shared::{
    api::{
        error::ServerError,
        payloads::{
            CreateUser, LoginRequest, LoginResponse, Message, PlanVersionChange, PlanVersionQuery,
            UpdateUser, UserDetails,
        },
        response_errors::WorkoutError,
        Object,
    },
    model::{hash_password, Gender, NewUser, PlanVersion, User, ValidateModel},
};
use tracing::{info, instrument};

use crate::{
    cli::Cli,
    db::DatabaseConnection,
    progression::{change_plan_version, require_user, seed_user, switch_plan_version},
    Args,
};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Pool: FromRef<S>,
    Arc<Cli>: FromRef<S>,
{
    Router::new()
        .route(Object::Users.path(), get(list_users).post(create_user))
        .route(Object::UserLogin.path(), post(login))
        .route(
            Object::UserId.path(),
            get(fetch_user).patch(update_user).delete(delete_user),
        )
        .route(Object::UserPlanVersion.path(), put(update_plan_version))
}

#[instrument(skip(conn))]
async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<UserDetails>>, ServerError<WorkoutError>> {
    let users = conn
        .interact(|conn| {
            User::fetch_all(conn)?
                .into_iter()
                .map(|user| UserDetails::fetch(conn, user))
                .collect::<rusqlite::Result<Vec<_>>>()
        })
        .await??;

    Ok(Json(users))
}

#[instrument(skip(conn))]
async fn fetch_user(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
) -> Result<Json<UserDetails>, ServerError<WorkoutError>> {
    let user = conn
        .interact(move |conn| {
            let user = require_user(conn, user_id)?;
            Ok::<_, ServerError<WorkoutError>>(UserDetails::fetch(conn, user)?)
        })
        .await??;

    Ok(Json(user))
}

/// Creates the user with the mandatory exercises and a full cycle of plans.
/// A `plan_version` query parameter takes precedence over the one in the body.
#[instrument(skip(conn, args, new_user), fields(nickname = %new_user.nickname))]
async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    args: Args,
    Query(query): Query<PlanVersionQuery>,
    Json(new_user): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserDetails>), ServerError<WorkoutError>> {
    new_user.validate()?;

    let plan_version = PlanVersion::parse_or(
        query.plan_version.as_deref().or(new_user.plan_version.as_deref()),
        PlanVersion::default(),
    )?;
    let gender: Gender = new_user.gender.parse()?;
    let bcrypt_cost = args.bcrypt_cost;

    let user = conn
        .interact(move |conn| {
            let password_hash = hash_password(&new_user.password, bcrypt_cost)?;

            let tx = conn.transaction()?;
            if User::fetch_by_nickname(&tx, &new_user.nickname)?.is_some() {
                Err(WorkoutError::NicknameTaken {
                    nickname: new_user.nickname.clone(),
                })?;
            }

            let user = User::create(
                &tx,
                NewUser {
                    nickname: new_user.nickname,
                    age: new_user.age,
                    height: new_user.height,
                    weight: new_user.weight,
                    gender,
                    weight_goal: new_user.weight_goal,
                    plan_version,
                    password_hash,
                },
            )?;
            seed_user(&tx, &user)?;
            let details = UserDetails::fetch(&tx, user)?;

            tx.commit()?;
            Ok::<_, ServerError<WorkoutError>>(details)
        })
        .await??;

    info!(user_id = user.user.id, %plan_version, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Partial update. Changing the plan version regenerates the user's plans in
/// the same transaction.
#[instrument(skip(conn, args, update))]
async fn update_user(
    DatabaseConnection(conn): DatabaseConnection,
    args: Args,
    Path(user_id): Path<i64>,
    Json(update): Json<UpdateUser>,
) -> Result<Json<User>, ServerError<WorkoutError>> {
    update.validate()?;

    let gender = update
        .gender
        .as_deref()
        .map(str::parse::<Gender>)
        .transpose()?;
    let plan_version = update
        .plan_version
        .as_deref()
        .map(str::parse::<PlanVersion>)
        .transpose()?;
    let bcrypt_cost = args.bcrypt_cost;

    let user = conn
        .interact(move |conn| {
            let password_hash = update
                .password
                .as_deref()
                .map(|password| hash_password(password, bcrypt_cost))
                .transpose()?;

            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let mut user = require_user(&tx, user_id)?;

            if let Some(nickname) = update.nickname {
                if nickname != user.nickname && User::fetch_by_nickname(&tx, &nickname)?.is_some()
                {
                    Err(WorkoutError::NicknameTaken { nickname })?;
                } else {
                    user.nickname = nickname;
                }
            }
            if let Some(password_hash) = password_hash {
                user.password_hash = password_hash;
            }
            if let Some(gender) = gender {
                user.gender = gender;
            }
            user.age = update.age.unwrap_or(user.age);
            user.height = update.height.unwrap_or(user.height);
            user.weight = update.weight.unwrap_or(user.weight);
            if let Some(weight_goal) = update.weight_goal {
                user.weight_goal = weight_goal;
            }
            user.update(&tx)?;

            if let Some(plan_version) = plan_version {
                switch_plan_version(&tx, &mut user, plan_version)?;
            }

            tx.commit()?;
            Ok::<_, ServerError<WorkoutError>>(user)
        })
        .await??;

    Ok(Json(user))
}

#[instrument(skip(conn))]
async fn delete_user(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
) -> Result<Json<Message>, ServerError<WorkoutError>> {
    let deleted = conn.interact(move |conn| User::delete(conn, user_id)).await??;
    if deleted == 0 {
        Err(WorkoutError::UserNotFound { user_id })?;
    }

    info!(user_id, "Deleted user");
    Ok(Json(Message::new(format!("User {user_id} deleted"))))
}

#[instrument(skip(conn, credentials), fields(nickname = %credentials.nickname))]
async fn login(
    DatabaseConnection(conn): DatabaseConnection,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServerError<WorkoutError>> {
    let response = conn
        .interact(move |conn| {
            let user = User::fetch_by_nickname(conn, &credentials.nickname)?
                .ok_or(WorkoutError::InvalidCredentials)?;
            if !user.verify_password(&credentials.password)? {
                Err(WorkoutError::InvalidCredentials)?;
            }

            Ok::<_, ServerError<WorkoutError>>(LoginResponse {
                id: user.id,
                nickname: user.nickname,
            })
        })
        .await??;

    Ok(Json(response))
}

#[instrument(skip(conn))]
async fn update_plan_version(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<i64>,
    Json(change): Json<PlanVersionChange>,
) -> Result<Json<User>, ServerError<WorkoutError>> {
    let plan_version: PlanVersion = change.plan_version.parse()?;

    let user = conn
        .interact(move |conn| change_plan_version(conn, user_id, plan_version))
        .await??;

    Ok(Json(user))
}
