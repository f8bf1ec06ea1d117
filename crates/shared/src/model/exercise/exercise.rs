use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// A lift tracked for a user. Only the main lifts get generated week plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Exercise {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub one_rep_max: f64,
    /// Sum of the AMRAP increments earned since the one rep max was last set
    pub progress_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct NewExercise {
    pub user_id: i64,
    pub name: String,
    pub one_rep_max: f64,
    pub progress_weight: f64,
}

impl NewExercise {
    pub fn new<S: Into<String>>(user_id: i64, name: S, one_rep_max: f64) -> Self {
        Self {
            user_id,
            name: name.into(),
            one_rep_max,
            progress_weight: 0.0,
        }
    }
}

#[cfg(feature = "backend")]
impl Exercise {
    fn select() -> SelectStatement {
        Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Name,
                ExerciseIden::OneRepMax,
                ExerciseIden::ProgressWeight,
            ])
            .from(ExerciseIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Exercise>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), Exercise::from_row).optional()
    }

    /// Fetches the exercise only if it belongs to the user
    pub fn fetch_owned(
        conn: &Connection,
        user_id: i64,
        id: i64,
    ) -> rusqlite::Result<Option<Exercise>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .and_where(Expr::col(ExerciseIden::UserId).eq(user_id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), Exercise::from_row).optional()
    }

    pub fn fetch_for_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Exercise>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(ExerciseIden::UserId).eq(user_id))
            .order_by(ExerciseIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt.query_map(&*values.as_params(), Exercise::from_row)?;
        exercises.collect()
    }

    pub fn create(conn: &Connection, new_exercise: NewExercise) -> rusqlite::Result<Exercise> {
        new_exercise.insert(conn)?;
        Exercise::fetch_by_id(conn, conn.last_insert_rowid())?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)
    }

    pub fn update(&self, conn: &Connection) -> rusqlite::Result<()> {
        let (sql, values) = Query::update()
            .table(ExerciseIden::Table)
            .values([
                (ExerciseIden::Name, self.name.clone().into()),
                (ExerciseIden::OneRepMax, self.one_rep_max.into()),
                (ExerciseIden::ProgressWeight, self.progress_weight.into()),
            ])
            .and_where(Expr::col(ExerciseIden::Id).eq(self.id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(())
    }

    /// Deletes the exercise along with its week plans and sets
    pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
        let (sql, values) = Query::delete()
            .from_table(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }
}
