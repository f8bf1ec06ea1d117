use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {crate::model::Exercise, rusqlite::Connection};

use super::ExerciseWithPlans;
use crate::{
    api::error::ValidationError,
    model::{check_all, User, ValidateModel, WeightHistory},
};

/// User with everything they own, as returned by the user routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: User,
    pub exercises: Vec<ExerciseWithPlans>,
    pub weight_history: Vec<WeightHistory>,
}

#[cfg(feature = "backend")]
impl UserDetails {
    pub fn fetch(conn: &Connection, user: User) -> rusqlite::Result<Self> {
        let exercises = Exercise::fetch_for_user(conn, user.id)?
            .into_iter()
            .map(|e| ExerciseWithPlans::fetch(conn, e))
            .collect::<rusqlite::Result<_>>()?;
        let weight_history = WeightHistory::fetch_for_user(conn, user.id)?;

        Ok(Self {
            user,
            exercises,
            weight_history,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUser {
    pub nickname: String,
    pub age: i64,
    pub height: f64,
    pub weight: f64,
    pub gender: String,
    pub weight_goal: Option<f64>,
    pub password: String,
    /// Overridden by the `plan_version` query parameter when both are given
    pub plan_version: Option<String>,
}

impl ValidateModel for CreateUser {
    fn validate(&self) -> Result<(), ValidationError> {
        check_all([
            (!self.nickname.trim().is_empty(), "nickname can't be empty"),
            (self.age > 0, "age must be positive"),
            (self.height > 0.0, "height must be positive"),
            (self.weight > 0.0, "weight must be positive"),
            (
                self.weight_goal.map_or(true, |w| w > 0.0),
                "weight_goal must be positive",
            ),
            (!self.password.is_empty(), "password can't be empty"),
        ])
    }
}

/// Partial update, absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub nickname: Option<String>,
    pub password: Option<String>,
    pub age: Option<i64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub gender: Option<String>,
    /// `null` clears the goal, leaving the field out keeps it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub weight_goal: Option<Option<f64>>,
    pub plan_version: Option<String>,
}

impl ValidateModel for UpdateUser {
    fn validate(&self) -> Result<(), ValidationError> {
        check_all([
            (
                self.nickname.as_ref().map_or(true, |n| !n.trim().is_empty()),
                "nickname can't be empty",
            ),
            (self.age.map_or(true, |a| a > 0), "age must be positive"),
            (self.height.map_or(true, |h| h > 0.0), "height must be positive"),
            (self.weight.map_or(true, |w| w > 0.0), "weight must be positive"),
            (
                self.weight_goal.flatten().map_or(true, |w| w > 0.0),
                "weight_goal must be positive",
            ),
            (
                self.password.as_ref().map_or(true, |p| !p.is_empty()),
                "password can't be empty",
            ),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: i64,
    pub nickname: String,
}
