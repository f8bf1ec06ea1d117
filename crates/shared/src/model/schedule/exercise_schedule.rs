use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// An ad-hoc exercise prescription inside a scheduled training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise_schedule"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct ExerciseSchedule {
    pub id: i64,
    pub training_plan_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    /// Seconds
    pub rest_time: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise_schedule"))]
pub struct NewExerciseSchedule {
    pub training_plan_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub rest_time: Option<i64>,
    pub notes: Option<String>,
}

#[cfg(feature = "backend")]
impl ExerciseSchedule {
    fn select() -> SelectStatement {
        Query::select()
            .columns([
                ExerciseScheduleIden::Id,
                ExerciseScheduleIden::TrainingPlanId,
                ExerciseScheduleIden::ExerciseId,
                ExerciseScheduleIden::Sets,
                ExerciseScheduleIden::Reps,
                ExerciseScheduleIden::Weight,
                ExerciseScheduleIden::RestTime,
                ExerciseScheduleIden::Notes,
            ])
            .from(ExerciseScheduleIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<ExerciseSchedule>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(ExerciseScheduleIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), ExerciseSchedule::from_row).optional()
    }

    /// Fetches the prescription only if it is part of the given plan
    pub fn fetch_in_plan(
        conn: &Connection,
        training_plan_id: i64,
        id: i64,
    ) -> rusqlite::Result<Option<ExerciseSchedule>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(ExerciseScheduleIden::Id).eq(id))
            .and_where(Expr::col(ExerciseScheduleIden::TrainingPlanId).eq(training_plan_id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), ExerciseSchedule::from_row).optional()
    }

    pub fn fetch_for_plan(
        conn: &Connection,
        training_plan_id: i64,
    ) -> rusqlite::Result<Vec<ExerciseSchedule>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(ExerciseScheduleIden::TrainingPlanId).eq(training_plan_id))
            .order_by(ExerciseScheduleIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt.query_map(&*values.as_params(), ExerciseSchedule::from_row)?;
        exercises.collect()
    }

    pub fn create(
        conn: &Connection,
        new_exercise: NewExerciseSchedule,
    ) -> rusqlite::Result<ExerciseSchedule> {
        new_exercise.insert(conn)?;
        ExerciseSchedule::fetch_by_id(conn, conn.last_insert_rowid())?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)
    }

    pub fn update(&self, conn: &Connection) -> rusqlite::Result<()> {
        let (sql, values) = Query::update()
            .table(ExerciseScheduleIden::Table)
            .values([
                (ExerciseScheduleIden::Sets, self.sets.into()),
                (ExerciseScheduleIden::Reps, self.reps.into()),
                (ExerciseScheduleIden::Weight, self.weight.into()),
                (ExerciseScheduleIden::RestTime, self.rest_time.into()),
                (ExerciseScheduleIden::Notes, self.notes.clone().into()),
            ])
            .and_where(Expr::col(ExerciseScheduleIden::Id).eq(self.id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(())
    }

    pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
        let (sql, values) = Query::delete()
            .from_table(ExerciseScheduleIden::Table)
            .and_where(Expr::col(ExerciseScheduleIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }
}
