use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use exemplar::Model;

use super::Gender;
use crate::model::PlanVersion;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
pub struct NewUser {
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
