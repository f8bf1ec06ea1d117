use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// A named training session on a calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("training_plan_schedule"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct TrainingPlanSchedule {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub scheduled_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("training_plan_schedule"))]
pub struct NewTrainingPlanSchedule {
    pub user_id: i64,
    pub name: String,
    pub scheduled_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "backend")]
impl TrainingPlanSchedule {
    fn select() -> SelectStatement {
        Query::select()
            .columns([
                TrainingPlanScheduleIden::Id,
                TrainingPlanScheduleIden::UserId,
                TrainingPlanScheduleIden::Name,
                TrainingPlanScheduleIden::ScheduledDate,
                TrainingPlanScheduleIden::Notes,
                TrainingPlanScheduleIden::CreatedAt,
            ])
            .from(TrainingPlanScheduleIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(
        conn: &Connection,
        id: i64,
    ) -> rusqlite::Result<Option<TrainingPlanSchedule>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(TrainingPlanScheduleIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), TrainingPlanSchedule::from_row)
            .optional()
    }

    pub fn fetch_owned(
        conn: &Connection,
        user_id: i64,
        id: i64,
    ) -> rusqlite::Result<Option<TrainingPlanSchedule>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(TrainingPlanScheduleIden::Id).eq(id))
            .and_where(Expr::col(TrainingPlanScheduleIden::UserId).eq(user_id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), TrainingPlanSchedule::from_row)
            .optional()
    }

    /// The user's plans ordered by date, optionally limited to an inclusive
    /// date range
    pub fn fetch_for_user(
        conn: &Connection,
        user_id: i64,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
    ) -> rusqlite::Result<Vec<TrainingPlanSchedule>> {
        let mut query = Self::select();
        query.and_where(Expr::col(TrainingPlanScheduleIden::UserId).eq(user_id));
        if let Some(from_date) = from_date {
            query.and_where(Expr::col(TrainingPlanScheduleIden::ScheduledDate).gte(from_date));
        }
        if let Some(to_date) = to_date {
            query.and_where(Expr::col(TrainingPlanScheduleIden::ScheduledDate).lte(to_date));
        }
        let (sql, values) = query
            .order_by(TrainingPlanScheduleIden::ScheduledDate, Order::Asc)
            .order_by(TrainingPlanScheduleIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let plans = stmt.query_map(&*values.as_params(), TrainingPlanSchedule::from_row)?;
        plans.collect()
    }

    pub fn create(
        conn: &Connection,
        new_plan: NewTrainingPlanSchedule,
    ) -> rusqlite::Result<TrainingPlanSchedule> {
        new_plan.insert(conn)?;
        TrainingPlanSchedule::fetch_by_id(conn, conn.last_insert_rowid())?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)
    }

    pub fn update(&self, conn: &Connection) -> rusqlite::Result<()> {
        let (sql, values) = Query::update()
            .table(TrainingPlanScheduleIden::Table)
            .values([
                (TrainingPlanScheduleIden::Name, self.name.clone().into()),
                (TrainingPlanScheduleIden::ScheduledDate, self.scheduled_date.into()),
                (TrainingPlanScheduleIden::Notes, self.notes.clone().into()),
            ])
            .and_where(Expr::col(TrainingPlanScheduleIden::Id).eq(self.id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(())
    }

    /// Deletes the plan and its exercise prescriptions
    pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
        let (sql, values) = Query::delete()
            .from_table(TrainingPlanScheduleIden::Table)
            .and_where(Expr::col(TrainingPlanScheduleIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }
}
