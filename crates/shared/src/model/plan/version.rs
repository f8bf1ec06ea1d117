use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};

use crate::api::response_errors::WorkoutError;

/// Periodization scheme a user trains with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlanVersion {
    /// Rotates the rep schemes across the lifts in weeks 1-3
    #[default]
    A,
    /// Alternates 6s and 4s for every lift in weeks 1-4
    B,
}

impl PlanVersion {
    pub const ALL: [PlanVersion; 2] = [PlanVersion::A, PlanVersion::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanVersion::A => "A",
            PlanVersion::B => "B",
        }
    }

    /// Parses an optional request value, falling back to `default` when absent
    pub fn parse_or(value: Option<&str>, default: PlanVersion) -> Result<PlanVersion, WorkoutError> {
        value.map(str::parse::<PlanVersion>).unwrap_or(Ok(default))
    }
}

impl fmt::Display for PlanVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanVersion {
    type Err = WorkoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(PlanVersion::A),
            "B" => Ok(PlanVersion::B),
            other => Err(WorkoutError::InvalidPlanVersion {
                plan_version: other.to_owned(),
            }),
        }
    }
}

#[cfg(feature = "backend")]
impl ToSql for PlanVersion {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

#[cfg(feature = "backend")]
impl FromSql for PlanVersion {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: WorkoutError| FromSqlError::Other(Box::new(e)))
    }
}
