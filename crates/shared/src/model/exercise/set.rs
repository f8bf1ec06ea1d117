use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    super::{ExerciseIden, WeekPlan, WeekPlanIden},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Asterisk, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// A single prescribed set. `weight` is materialized when the set is written
/// and rewritten whenever the exercise's one rep max or progress weight changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout_set"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct WorkoutSet {
    pub id: i64,
    pub week_plan_id: i64,
    pub reps: i64,
    pub percentage: f64,
    pub is_amrap: bool,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout_set"))]
pub struct NewWorkoutSet {
    pub week_plan_id: i64,
    pub reps: i64,
    pub percentage: f64,
    pub is_amrap: bool,
    pub weight: f64,
}

#[cfg(feature = "backend")]
impl WorkoutSet {
    fn select() -> SelectStatement {
        Query::select()
            .column((WorkoutSetIden::Table, Asterisk))
            .from(WorkoutSetIden::Table)
            .to_owned()
    }

    fn select_with_plan() -> SelectStatement {
        Self::select()
            .inner_join(
                WeekPlanIden::Table,
                Expr::col((WeekPlanIden::Table, WeekPlanIden::Id))
                    .equals((WorkoutSetIden::Table, WorkoutSetIden::WeekPlanId)),
            )
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<WorkoutSet>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col((WorkoutSetIden::Table, WorkoutSetIden::Id)).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), WorkoutSet::from_row).optional()
    }

    /// Fetches the set only if it belongs to one of the user's exercises
    pub fn fetch_owned(
        conn: &Connection,
        user_id: i64,
        id: i64,
    ) -> rusqlite::Result<Option<WorkoutSet>> {
        let (sql, values) = Self::select_with_plan()
            .inner_join(
                ExerciseIden::Table,
                Expr::col((ExerciseIden::Table, ExerciseIden::Id))
                    .equals((WeekPlanIden::Table, WeekPlanIden::ExerciseId)),
            )
            .and_where(Expr::col((WorkoutSetIden::Table, WorkoutSetIden::Id)).eq(id))
            .and_where(Expr::col((ExerciseIden::Table, ExerciseIden::UserId)).eq(user_id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), WorkoutSet::from_row).optional()
    }

    /// Sets of a week plan in the order they are performed
    pub fn fetch_for_week_plan(
        conn: &Connection,
        week_plan_id: i64,
    ) -> rusqlite::Result<Vec<WorkoutSet>> {
        let (sql, values) = Self::select()
            .and_where(
                Expr::col((WorkoutSetIden::Table, WorkoutSetIden::WeekPlanId)).eq(week_plan_id),
            )
            .order_by((WorkoutSetIden::Table, WorkoutSetIden::Id), Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let sets = stmt.query_map(&*values.as_params(), WorkoutSet::from_row)?;
        sets.collect()
    }

    /// Sets of every week plan of an exercise, limited to weeks strictly after
    /// `after_week` when given
    pub fn fetch_for_exercise(
        conn: &Connection,
        exercise_id: i64,
        after_week: Option<i64>,
    ) -> rusqlite::Result<Vec<WorkoutSet>> {
        let mut query = Self::select_with_plan();
        query.and_where(Expr::col((WeekPlanIden::Table, WeekPlanIden::ExerciseId)).eq(exercise_id));
        if let Some(week) = after_week {
            query.and_where(Expr::col((WeekPlanIden::Table, WeekPlanIden::WeekNumber)).gt(week));
        }
        let (sql, values) = query
            .order_by((WorkoutSetIden::Table, WorkoutSetIden::Id), Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let sets = stmt.query_map(&*values.as_params(), WorkoutSet::from_row)?;
        sets.collect()
    }

    pub fn create(conn: &Connection, new_set: NewWorkoutSet) -> rusqlite::Result<WorkoutSet> {
        new_set.insert(conn)?;
        WorkoutSet::fetch_by_id(conn, conn.last_insert_rowid())?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)
    }

    pub fn update_weight(conn: &Connection, id: i64, weight: f64) -> rusqlite::Result<()> {
        let (sql, values) = Query::update()
            .table(WorkoutSetIden::Table)
            .values([(WorkoutSetIden::Weight, weight.into())])
            .and_where(Expr::col(WorkoutSetIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(())
    }

    /// Deletes the sets of every exercise the user owns
    pub fn delete_for_user(conn: &Connection, user_id: i64) -> rusqlite::Result<usize> {
        let (sql, values) = Query::delete()
            .from_table(WorkoutSetIden::Table)
            .and_where(
                Expr::col(WorkoutSetIden::WeekPlanId).in_subquery(WeekPlan::ids_for_user(user_id)),
            )
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }
}
