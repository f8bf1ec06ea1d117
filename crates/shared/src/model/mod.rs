mod user;
pub use user::*;

mod exercise;
pub use exercise::*;

pub mod plan;
pub use plan::{MainLift, PlanVersion};

mod weight_history;
pub use weight_history::*;

mod schedule;
pub use schedule::*;

pub mod constants;

use crate::api::error::ValidationError;

pub trait ValidateModel {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Collects the failed checks into a single [`ValidationError`]
pub(crate) fn check_all<'a, I>(checks: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (bool, &'a str)>,
{
    let error_messages: Vec<String> = checks
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, message)| message.to_owned())
        .collect();

    if error_messages.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { error_messages })
    }
}
