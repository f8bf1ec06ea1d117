//! Fixed prescription tables for both plan versions.
//!
//! Each entry maps `(PlanVersion, week, MainLift)` to the ordered sets a lifter
//! performs that week, expressed as a percentage of their one rep max. Weeks 1-4
//! build volume, week 5 is a deload and week 6 tests a new max.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{MainLift, PlanVersion};
use crate::model::constants::PLAN_WEEKS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub reps: i64,
    pub percentage: f64,
    pub is_amrap: bool,
}

const fn set(reps: i64, percentage: f64) -> Prescription {
    Prescription {
        reps,
        percentage,
        is_amrap: false,
    }
}

const fn amrap(reps: i64, percentage: f64) -> Prescription {
    Prescription {
        reps,
        percentage,
        is_amrap: true,
    }
}

const SIXES: &[Prescription] = &[set(6, 62.5), set(6, 70.0), set(6, 70.0), amrap(6, 70.0)];

const FOURS: &[Prescription] = &[
    set(4, 70.0),
    set(4, 75.0),
    set(4, 80.0),
    set(4, 80.0),
    amrap(4, 80.0),
];

const LADDER: &[Prescription] = &[
    set(6, 65.0),
    set(4, 75.0),
    set(2, 85.0),
    set(2, 90.0),
    amrap(2, 90.0),
    set(4, 75.0),
];

const DELOAD: &[Prescription] = &[set(4, 50.0), set(3, 65.0), set(2, 80.0), set(1, 90.0)];

const MAX_TEST_A: &[Prescription] = &[
    set(5, 50.0),
    set(4, 60.0),
    set(3, 70.0),
    set(2, 80.0),
    set(1, 90.0),
    set(1, 100.0),
];

const MAX_TEST_B: &[Prescription] = &[
    set(5, 60.0),
    set(4, 70.0),
    set(3, 80.0),
    amrap(2, 90.0),
    set(1, 100.0),
];

/// Sets prescribed for a lift in the given week, `None` outside weeks 1-6
pub fn lookup(version: PlanVersion, week: i64, lift: MainLift) -> Option<&'static [Prescription]> {
    use MainLift::*;
    use PlanVersion::*;

    let prescriptions = match (version, week, lift) {
        (A, 1, Squats) | (A, 2, DeadLift) | (A, 3, BenchPress) => SIXES,
        (A, 1, DeadLift) | (A, 2, BenchPress) | (A, 3, Squats) => FOURS,
        (A, 1, BenchPress) | (A, 2, Squats) | (A, 3, DeadLift) | (A, 4, _) => LADDER,
        (B, 1 | 3, _) => SIXES,
        (B, 2 | 4, _) => FOURS,
        (_, 5, _) => DELOAD,
        (A, 6, _) => MAX_TEST_A,
        (B, 6, _) => MAX_TEST_B,
        _ => return None,
    };

    Some(prescriptions)
}

/// Same as [`lookup`] for a free text exercise name. Exercises that aren't one
/// of the main lifts have no program.
pub fn lookup_by_name(
    version: PlanVersion,
    week: i64,
    exercise_name: &str,
) -> Option<&'static [Prescription]> {
    MainLift::from_name(exercise_name).and_then(|lift| lookup(version, week, lift))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDescription {
    pub description: String,
    pub characteristics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDifferences {
    pub plan_a: PlanDescription,
    pub plan_b: PlanDescription,
    pub key_differences: Vec<String>,
}

/// `week_N` -> lift name -> sets
pub type PlanTable = BTreeMap<String, BTreeMap<String, Vec<Prescription>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanComparison {
    pub differences: PlanDifferences,
    pub plan_a: PlanTable,
    pub plan_b: PlanTable,
}

/// Full table for a version in a readable form
pub fn table(version: PlanVersion) -> PlanTable {
    PLAN_WEEKS
        .map(|week| {
            let lifts = MainLift::ALL
                .into_iter()
                .filter_map(|lift| {
                    lookup(version, week, lift).map(|sets| (lift.name().to_owned(), sets.to_vec()))
                })
                .collect();
            (format!("week_{week}"), lifts)
        })
        .collect()
}

fn strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| (*s).to_owned()).collect()
}

pub fn comparison() -> PlanComparison {
    let differences = PlanDifferences {
        plan_a: PlanDescription {
            description: "Plan A (classic): each lift rotates through the 6s, 4s and ladder \
                          schemes over weeks 1-3"
                .to_owned(),
            characteristics: strings(&[
                "Weeks 1-3: every lift follows a different scheme each week",
                "Week 4: all lifts use the 6/4/2 ladder with an AMRAP set",
                "Week 5: deload with lighter loads for recovery",
                "Week 6: max test up to 100% of 1RM",
            ]),
        },
        plan_b: PlanDescription {
            description: "Plan B (modified): a simpler repeating 6/4/6/4 pattern over weeks 1-4"
                .to_owned(),
            characteristics: strings(&[
                "Weeks 1 and 3: all lifts use the 6 rep scheme",
                "Weeks 2 and 4: all lifts use the 4 rep scheme",
                "Week 5: deload with lighter loads for recovery",
                "Week 6: max test with an AMRAP on the second to last set",
            ]),
        },
        key_differences: strings(&[
            "Plan A varies the training layout more in weeks 1-3",
            "Plan B has a simpler, more repetitive structure (6/4/6/4)",
            "Plan B also has an AMRAP set in week 6 before the final load",
        ]),
    };

    PlanComparison {
        differences,
        plan_a: table(PlanVersion::A),
        plan_b: table(PlanVersion::B),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reps_and_percentages(sets: &[Prescription]) -> Vec<(i64, f64, bool)> {
        sets.iter().map(|p| (p.reps, p.percentage, p.is_amrap)).collect()
    }

    #[test]
    fn test_every_week_has_every_lift() {
        for version in PlanVersion::ALL {
            for week in PLAN_WEEKS {
                for lift in MainLift::ALL {
                    assert!(
                        lookup(version, week, lift).is_some(),
                        "{version} week {week} {lift}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_weeks_outside_cycle() {
        for week in [-1, 0, 7, 100] {
            assert_eq!(lookup(PlanVersion::A, week, MainLift::Squats), None);
            assert_eq!(lookup(PlanVersion::B, week, MainLift::BenchPress), None);
        }
    }

    #[test]
    fn test_version_a_rotation() {
        assert_eq!(lookup(PlanVersion::A, 1, MainLift::Squats), Some(SIXES));
        assert_eq!(lookup(PlanVersion::A, 1, MainLift::DeadLift), Some(FOURS));
        assert_eq!(lookup(PlanVersion::A, 1, MainLift::BenchPress), Some(LADDER));
        assert_eq!(lookup(PlanVersion::A, 2, MainLift::Squats), Some(LADDER));
        assert_eq!(lookup(PlanVersion::A, 2, MainLift::DeadLift), Some(SIXES));
        assert_eq!(lookup(PlanVersion::A, 2, MainLift::BenchPress), Some(FOURS));
        assert_eq!(lookup(PlanVersion::A, 3, MainLift::Squats), Some(FOURS));
        assert_eq!(lookup(PlanVersion::A, 3, MainLift::DeadLift), Some(LADDER));
        assert_eq!(lookup(PlanVersion::A, 3, MainLift::BenchPress), Some(SIXES));
        for lift in MainLift::ALL {
            assert_eq!(lookup(PlanVersion::A, 4, lift), Some(LADDER));
        }
    }

    #[test]
    fn test_version_b_alternates() {
        for lift in MainLift::ALL {
            assert_eq!(lookup(PlanVersion::B, 1, lift), Some(SIXES));
            assert_eq!(lookup(PlanVersion::B, 2, lift), Some(FOURS));
            assert_eq!(lookup(PlanVersion::B, 3, lift), Some(SIXES));
            assert_eq!(lookup(PlanVersion::B, 4, lift), Some(FOURS));
        }
    }

    #[test]
    fn test_deload_is_shared() {
        for lift in MainLift::ALL {
            let a = lookup(PlanVersion::A, 5, lift).map(reps_and_percentages);
            let b = lookup(PlanVersion::B, 5, lift).map(reps_and_percentages);
            assert_eq!(a, b);
            assert_eq!(
                a,
                Some(vec![(4, 50.0, false), (3, 65.0, false), (2, 80.0, false), (1, 90.0, false)])
            );
        }
    }

    #[test]
    fn test_max_test_week() {
        let a = lookup(PlanVersion::A, 6, MainLift::Squats).unwrap();
        assert!(a.iter().all(|p| !p.is_amrap));
        assert_eq!(a.last().map(|p| p.percentage), Some(100.0));

        let b = reps_and_percentages(lookup(PlanVersion::B, 6, MainLift::DeadLift).unwrap());
        assert_eq!(
            b,
            vec![(5, 60.0, false), (4, 70.0, false), (3, 80.0, false), (2, 90.0, true), (1, 100.0, false)]
        );
    }

    #[test]
    fn test_exactly_one_amrap_in_training_weeks() {
        for version in PlanVersion::ALL {
            for week in 1..=4 {
                for lift in MainLift::ALL {
                    let sets = lookup(version, week, lift).unwrap();
                    assert_eq!(sets.iter().filter(|p| p.is_amrap).count(), 1);
                }
            }
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(lookup_by_name(PlanVersion::A, 1, "squats"), Some(SIXES));
        assert_eq!(lookup_by_name(PlanVersion::A, 1, "overhead_press"), None);
    }

    #[test]
    fn test_comparison_tables() {
        let comparison = comparison();
        assert_eq!(comparison.plan_a.len(), 6);
        assert_eq!(comparison.plan_b.len(), 6);

        let week_1 = &comparison.plan_a["week_1"];
        assert_eq!(week_1.len(), 3);
        assert_eq!(week_1["squats"][0], set(6, 62.5));
        assert_eq!(comparison.plan_b["week_6"]["bench_press"][3], amrap(2, 90.0));
        assert_eq!(comparison.differences.key_differences.len(), 3);
    }

    #[test]
    fn test_comparison_json_shape() {
        let json = serde_json::to_value(comparison()).unwrap();
        assert_eq!(json["plan_a"]["week_4"]["dead_lift"][4]["is_amrap"], true);
        assert_eq!(json["plan_b"]["week_2"]["squats"][0]["reps"], 4);
        assert!(json["differences"]["plan_a"]["description"].is_string());
    }
}
