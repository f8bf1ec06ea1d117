use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// Body weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("weight_history"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct WeightHistory {
    pub id: i64,
    pub user_id: i64,
    pub weight: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("weight_history"))]
pub struct NewWeightHistory {
    pub user_id: i64,
    pub weight: f64,
    pub recorded_at: DateTime<Utc>,
}

impl NewWeightHistory {
    pub fn now(user_id: i64, weight: f64) -> Self {
        Self {
            user_id,
            weight,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(feature = "backend")]
impl WeightHistory {
    fn select() -> SelectStatement {
        Query::select()
            .columns([
                WeightHistoryIden::Id,
                WeightHistoryIden::UserId,
                WeightHistoryIden::Weight,
                WeightHistoryIden::RecordedAt,
            ])
            .from(WeightHistoryIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<WeightHistory>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(WeightHistoryIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), WeightHistory::from_row).optional()
    }

    /// Newest first
    pub fn fetch_for_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<WeightHistory>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(WeightHistoryIden::UserId).eq(user_id))
            .order_by(WeightHistoryIden::RecordedAt, Order::Desc)
            .order_by(WeightHistoryIden::Id, Order::Desc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let history = stmt.query_map(&*values.as_params(), WeightHistory::from_row)?;
        history.collect()
    }

    pub fn create(conn: &Connection, new_entry: NewWeightHistory) -> rusqlite::Result<WeightHistory> {
        new_entry.insert(conn)?;
        WeightHistory::fetch_by_id(conn, conn.last_insert_rowid())?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)
    }
}
