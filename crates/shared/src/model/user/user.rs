use serde::{Deserialize, Serialize};

use super::Gender;
use crate::model::PlanVersion;
#[cfg(feature = "backend")]
use {
    crate::model::NewUser,
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct User {
    pub id: i64,
    pub nickname: String,
    pub age: i64,
    pub height: f64,
    pub weight: f64,
    pub gender: Gender,
    pub weight_goal: Option<f64>,
    pub plan_version: PlanVersion,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

#[cfg(feature = "backend")]
impl User {
    fn select() -> SelectStatement {
        Query::select()
            .columns([
                UserIden::Id,
                UserIden::Nickname,
                UserIden::Age,
                UserIden::Height,
                UserIden::Weight,
                UserIden::Gender,
                UserIden::WeightGoal,
                UserIden::PlanVersion,
                UserIden::PasswordHash,
            ])
            .from(UserIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), User::from_row).optional()
    }

    pub fn fetch_by_nickname<T: AsRef<str>>(
        conn: &Connection,
        nickname: T,
    ) -> rusqlite::Result<Option<User>> {
        let (sql, values) = Self::select()
            .and_where(Expr::col(UserIden::Nickname).eq(nickname.as_ref()))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), User::from_row).optional()
    }

    pub fn fetch_all(conn: &Connection) -> rusqlite::Result<Vec<User>> {
        let (sql, values) = Self::select()
            .order_by(UserIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt.query_map(&*values.as_params(), User::from_row)?;
        users.collect()
    }

    /// Inserts the user and reads it back. Doesn't open a transaction so it can
    /// be combined with other writes.
    pub fn create(conn: &Connection, new_user: NewUser) -> rusqlite::Result<User> {
        new_user.insert(conn)?;
        User::fetch_by_id(conn, conn.last_insert_rowid())?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)
    }

    pub fn update(&self, conn: &Connection) -> rusqlite::Result<()> {
        let (sql, values) = Query::update()
            .table(UserIden::Table)
            .values([
                (UserIden::Nickname, self.nickname.clone().into()),
                (UserIden::Age, self.age.into()),
                (UserIden::Height, self.height.into()),
                (UserIden::Weight, self.weight.into()),
                (UserIden::Gender, self.gender.as_str().into()),
                (UserIden::WeightGoal, self.weight_goal.into()),
                (UserIden::PlanVersion, self.plan_version.as_str().into()),
                (UserIden::PasswordHash, self.password_hash.clone().into()),
            ])
            .and_where(Expr::col(UserIden::Id).eq(self.id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(())
    }

    /// Deletes the user. Everything the user owns goes with it through the
    /// foreign key cascades.
    pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
        let (sql, values) = Query::delete()
            .from_table(UserIden::Table)
            .and_where(Expr::col(UserIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }

    pub fn verify_password(&self, password: &str) -> Result<bool, bcrypt::BcryptError> {
        bcrypt::verify(password, &self.password_hash)
    }
}

#[cfg(feature = "backend")]
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}
