use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifts with a percentage based program in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainLift {
    Squats,
    DeadLift,
    BenchPress,
}

impl MainLift {
    pub const ALL: [MainLift; 3] = [MainLift::Squats, MainLift::DeadLift, MainLift::BenchPress];

    pub fn name(&self) -> &'static str {
        match self {
            MainLift::Squats => "squats",
            MainLift::DeadLift => "dead_lift",
            MainLift::BenchPress => "bench_press",
        }
    }

    /// Exercise names are free text, only the main lifts map to a program
    pub fn from_name(name: &str) -> Option<MainLift> {
        MainLift::ALL.into_iter().find(|lift| lift.name() == name)
    }
}

impl fmt::Display for MainLift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
