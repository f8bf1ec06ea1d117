//! Weekly plan generation and AMRAP based progression.
//!
//! Set weights are a snapshot of `one_rep_max * percentage / 100 + progress_weight`
//! taken when the set is written. Every operation that changes an exercise's one
//! rep max or progress weight rewrites the affected sets in the same transaction.

use std::collections::HashSet;

use rusqlite::{Connection, TransactionBehavior};
use shared::{
    api::{
        error::ServerError,
        payloads::{CreateExercise, WeekPlanWithSets},
        response_errors::WorkoutError,
    },
    model::{
        constants::{
            is_plan_week, progress_increment, set_weight, AMRAP_OVERACHIEVEMENT_FACTOR,
            DEFAULT_ONE_REP_MAX, MANDATORY_EXERCISES, PLAN_WEEKS,
        },
        plan::catalog,
        Exercise, NewExercise, NewWeekPlan, NewWorkoutSet, PlanVersion, User, WeekPlan,
        WorkoutSet,
    },
    other_error,
};
use tracing::{debug, info, instrument};

pub type ProgressionResult<T> = Result<T, ServerError<WorkoutError>>;

/// Result of recording an AMRAP set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmrapOutcome {
    pub progress_weight: f64,
    pub incremented: bool,
}

pub fn require_user(conn: &Connection, user_id: i64) -> ProgressionResult<User> {
    Ok(User::fetch_by_id(conn, user_id)?.ok_or(WorkoutError::UserNotFound { user_id })?)
}

fn require_plan_week(week_number: i64) -> ProgressionResult<()> {
    if !is_plan_week(week_number) {
        Err(WorkoutError::InvalidWeekNumber { week_number })?;
    }
    Ok(())
}

/// Writes the plans for a week for every exercise the user has a program for.
///
/// Doesn't check for existing plans and doesn't open a transaction, callers are
/// expected to do both. Weeks outside the cycle produce nothing.
#[instrument(skip(conn))]
pub fn generate_week_plan(
    conn: &Connection,
    user_id: i64,
    week_number: i64,
    plan_version: PlanVersion,
) -> ProgressionResult<Vec<WeekPlanWithSets>> {
    if !is_plan_week(week_number) {
        return Ok(Vec::new());
    }

    let mut plans = Vec::new();
    for exercise in Exercise::fetch_for_user(conn, user_id)? {
        let Some(prescriptions) = catalog::lookup_by_name(plan_version, week_number, &exercise.name)
        else {
            continue;
        };

        let week_plan = WeekPlan::create(
            conn,
            NewWeekPlan {
                exercise_id: exercise.id,
                week_number,
            },
        )?;

        let sets = prescriptions
            .iter()
            .map(|p| {
                WorkoutSet::create(
                    conn,
                    NewWorkoutSet {
                        week_plan_id: week_plan.id,
                        reps: p.reps,
                        percentage: p.percentage,
                        is_amrap: p.is_amrap,
                        weight: set_weight(
                            exercise.one_rep_max,
                            p.percentage,
                            exercise.progress_weight,
                        ),
                    },
                )
            })
            .collect::<rusqlite::Result<Vec<_>>>()?;

        plans.push(WeekPlanWithSets { week_plan, sets });
    }

    debug!("Generated {} week plans", plans.len());
    Ok(plans)
}

/// Returns the user's plans for the week, generating them first if there are
/// none. Runs in an immediate transaction so concurrent requests for the same
/// week can't both generate.
#[instrument(skip(conn))]
pub fn ensure_week_plan(
    conn: &mut Connection,
    user_id: i64,
    week_number: i64,
    plan_version: Option<PlanVersion>,
) -> ProgressionResult<Vec<WeekPlanWithSets>> {
    require_plan_week(week_number)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let user = require_user(&tx, user_id)?;

    let existing = WeekPlan::fetch_for_user_week(&tx, user_id, week_number)?;
    let plans = if existing.is_empty() {
        let plan_version = plan_version.unwrap_or(user.plan_version);
        generate_week_plan(&tx, user_id, week_number, plan_version)?
    } else {
        WeekPlanWithSets::fetch_all(&tx, existing)?
    };

    tx.commit()?;
    Ok(plans)
}

/// Rewrites the weight of the exercise's sets from its current one rep max and
/// progress weight. With `after_week` only later weeks are touched.
fn recompute_set_weights(
    conn: &Connection,
    exercise: &Exercise,
    after_week: Option<i64>,
) -> rusqlite::Result<usize> {
    let sets = WorkoutSet::fetch_for_exercise(conn, exercise.id, after_week)?;
    for set in &sets {
        let weight = set_weight(exercise.one_rep_max, set.percentage, exercise.progress_weight);
        WorkoutSet::update_weight(conn, set.id, weight)?;
    }
    Ok(sets.len())
}

/// Sets a new one rep max. Progress weight starts over from zero and every set
/// of the exercise is recomputed.
#[instrument(skip(conn))]
pub fn update_one_rep_max(
    conn: &mut Connection,
    user_id: i64,
    exercise_id: i64,
    one_rep_max: f64,
) -> ProgressionResult<Exercise> {
    let tx = conn.transaction()?;

    let mut exercise = Exercise::fetch_owned(&tx, user_id, exercise_id)?
        .ok_or(WorkoutError::ExerciseNotFound { exercise_id })?;
    exercise.one_rep_max = one_rep_max;
    exercise.progress_weight = 0.0;
    exercise.update(&tx)?;

    let updated = recompute_set_weights(&tx, &exercise, None)?;
    debug!("Recomputed {updated} sets");

    tx.commit()?;
    Ok(exercise)
}

/// Records the reps performed on an AMRAP set. Hitting at least twice the
/// prescribed reps bumps the exercise's progress weight, which then applies to
/// every later week.
#[instrument(skip(conn))]
pub fn record_amrap(
    conn: &mut Connection,
    user_id: i64,
    set_id: i64,
    reps_performed: i64,
) -> ProgressionResult<AmrapOutcome> {
    let tx = conn.transaction()?;

    let set = WorkoutSet::fetch_owned(&tx, user_id, set_id)?
        .filter(|s| s.is_amrap)
        .ok_or(WorkoutError::AmrapSetNotFound { set_id })?;
    let week_plan = WeekPlan::fetch_by_id(&tx, set.week_plan_id)?
        .ok_or_else(|| other_error!("Week plan {} of set {set_id} is missing", set.week_plan_id))?;
    let mut exercise = Exercise::fetch_by_id(&tx, week_plan.exercise_id)?.ok_or_else(|| {
        other_error!("Exercise {} of week plan {} is missing", week_plan.exercise_id, week_plan.id)
    })?;

    let incremented = reps_performed >= set.reps * AMRAP_OVERACHIEVEMENT_FACTOR;
    if incremented {
        exercise.progress_weight += progress_increment(&exercise.name);
        exercise.update(&tx)?;

        let updated = recompute_set_weights(&tx, &exercise, Some(week_plan.week_number))?;
        info!(
            exercise = exercise.name,
            progress_weight = exercise.progress_weight,
            "AMRAP overachieved, recomputed {updated} sets"
        );
    }

    tx.commit()?;
    Ok(AmrapOutcome {
        progress_weight: exercise.progress_weight,
        incremented,
    })
}

/// Switches the user to another plan version. Existing plans are thrown away
/// and weeks 1-6 regenerated, all in one transaction.
#[instrument(skip(conn))]
pub fn change_plan_version(
    conn: &mut Connection,
    user_id: i64,
    plan_version: PlanVersion,
) -> ProgressionResult<User> {
    let tx = conn.transaction()?;

    let mut user = require_user(&tx, user_id)?;
    if switch_plan_version(&tx, &mut user, plan_version)? {
        tx.commit()?;
    }
    Ok(user)
}

/// Does the work of [`change_plan_version`] inside a transaction the caller
/// owns. Returns false when the user already follows `plan_version`.
pub fn switch_plan_version(
    conn: &Connection,
    user: &mut User,
    plan_version: PlanVersion,
) -> ProgressionResult<bool> {
    if user.plan_version == plan_version {
        return Ok(false);
    }

    let sets = WorkoutSet::delete_for_user(conn, user.id)?;
    let plans = WeekPlan::delete_for_user(conn, user.id)?;
    debug!("Deleted {plans} week plans with {sets} sets");

    user.plan_version = plan_version;
    user.update(conn)?;

    for week_number in PLAN_WEEKS {
        generate_week_plan(conn, user.id, week_number, plan_version)?;
    }

    info!(user_id = user.id, %plan_version, "Switched plan version");
    Ok(true)
}

/// Gives a newly created user the mandatory exercises and a full cycle of
/// plans. Part of the user creation transaction.
#[instrument(skip(conn))]
pub fn seed_user(conn: &Connection, user: &User) -> ProgressionResult<Vec<Exercise>> {
    let exercises = MANDATORY_EXERCISES
        .iter()
        .map(|name| Exercise::create(conn, NewExercise::new(user.id, *name, DEFAULT_ONE_REP_MAX)))
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for week_number in PLAN_WEEKS {
        generate_week_plan(conn, user.id, week_number, user.plan_version)?;
    }

    Ok(exercises)
}

/// Adds exercises to a user. A user without any exercises has to provide all
/// the mandatory ones and gets a full cycle of plans once they're created.
/// Names the user already has are skipped.
#[instrument(skip(conn, exercises))]
pub fn initialize_exercises(
    conn: &mut Connection,
    user_id: i64,
    exercises: Vec<CreateExercise>,
) -> ProgressionResult<Vec<Exercise>> {
    let tx = conn.transaction()?;
    let user = require_user(&tx, user_id)?;

    let mut seen: HashSet<String> = Exercise::fetch_for_user(&tx, user_id)?
        .into_iter()
        .map(|e| e.name)
        .collect();
    let first_init = seen.is_empty();

    if first_init {
        let requested: HashSet<&str> = exercises.iter().map(|e| e.name.as_str()).collect();
        let missing: Vec<String> = MANDATORY_EXERCISES
            .iter()
            .filter(|name| !requested.contains(*name))
            .map(|name| (*name).to_owned())
            .collect();
        if !missing.is_empty() {
            Err(WorkoutError::MissingMandatoryExercises { missing })?;
        }
    }

    let mut created = Vec::new();
    for CreateExercise { name, one_rep_max } in exercises {
        if !seen.insert(name.clone()) {
            continue;
        }
        created.push(Exercise::create(&tx, NewExercise::new(user_id, name, one_rep_max))?);
    }

    if first_init {
        for week_number in PLAN_WEEKS {
            generate_week_plan(&tx, user_id, week_number, user.plan_version)?;
        }
    }

    tx.commit()?;
    Ok(created)
}
