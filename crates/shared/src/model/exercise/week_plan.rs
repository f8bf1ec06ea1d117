use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    super::ExerciseIden,
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Asterisk, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// One exercise's sets for one week of the cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("week_plan"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct WeekPlan {
    pub id: i64,
    pub exercise_id: i64,
    pub week_number: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("week_plan"))]
pub struct NewWeekPlan {
    pub exercise_id: i64,
    pub week_number: i64,
}

#[cfg(feature = "backend")]
impl WeekPlan {
    fn select() -> SelectStatement {
        Query::select()
            .column((WeekPlanIden::Table, Asterisk))
            .from(WeekPlanIden::Table)
            .to_owned()
    }

    /// Week plan ids of every exercise the user owns
    pub(crate) fn ids_for_user(user_id: i64) -> SelectStatement {
        Query::select()
            .column((WeekPlanIden::Table, WeekPlanIden::Id))
            .from(WeekPlanIden::Table)
            .inner_join(
                ExerciseIden::Table,
                Expr::col((ExerciseIden::Table, ExerciseIden::Id))
                    .equals((WeekPlanIden::Table, WeekPlanIden::ExerciseId)),
            )
            .and_where(Expr::col((ExerciseIden::Table, ExerciseIden::UserId)).eq(user_id))
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<WeekPlan>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col((WeekPlanIden::Table, WeekPlanIden::Id)).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), WeekPlan::from_row).optional()
    }

    /// Plans of all the user's exercises for the given week
    pub fn fetch_for_user_week(
        conn: &Connection,
        user_id: i64,
        week_number: i64,
    ) -> rusqlite::Result<Vec<WeekPlan>> {
        let (sql, values) = Self::select()
            .inner_join(
                ExerciseIden::Table,
                Expr::col((ExerciseIden::Table, ExerciseIden::Id))
                    .equals((WeekPlanIden::Table, WeekPlanIden::ExerciseId)),
            )
            .and_where(Expr::col((ExerciseIden::Table, ExerciseIden::UserId)).eq(user_id))
            .and_where(Expr::col((WeekPlanIden::Table, WeekPlanIden::WeekNumber)).eq(week_number))
            .order_by((WeekPlanIden::Table, WeekPlanIden::Id), Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let plans = stmt.query_map(&*values.as_params(), WeekPlan::from_row)?;
        plans.collect()
    }

    pub fn fetch_for_exercise(
        conn: &Connection,
        exercise_id: i64,
    ) -> rusqlite::Result<Vec<WeekPlan>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col((WeekPlanIden::Table, WeekPlanIden::ExerciseId)).eq(exercise_id))
            .order_by((WeekPlanIden::Table, WeekPlanIden::WeekNumber), Order::Asc)
            .order_by((WeekPlanIden::Table, WeekPlanIden::Id), Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let plans = stmt.query_map(&*values.as_params(), WeekPlan::from_row)?;
        plans.collect()
    }

    pub fn create(conn: &Connection, new_plan: NewWeekPlan) -> rusqlite::Result<WeekPlan> {
        new_plan.insert(conn)?;
        WeekPlan::fetch_by_id(conn, conn.last_insert_rowid())?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)
    }

    /// Deletes the week plans of every exercise the user owns. Sets are removed
    /// by the cascade.
    pub fn delete_for_user(conn: &Connection, user_id: i64) -> rusqlite::Result<usize> {
        let (sql, values) = Query::delete()
            .from_table(WeekPlanIden::Table)
            .and_where(Expr::col(WeekPlanIden::Id).in_subquery(Self::ids_for_user(user_id)))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }
}
